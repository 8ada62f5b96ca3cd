use byteorder::{ByteOrder, NativeEndian};

use crate::error::{Error, Result};

macro_rules! read {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $decode:expr) => {
        $(#[$meta])*
        pub fn $name(&self, offset: usize) -> Result<($ty, usize)> {
            let width = size_of::<$ty>();
            let bytes = self.bytes_at(offset, width)?;
            Ok((($decode)(bytes), offset + width))
        }
    };
}

/// A bounds-checked view over a program image.
///
/// The cursor keeps no position of its own. Every read takes the offset to read from and hands
/// back the value together with the offset just past it, so one image can be probed from any
/// number of starting points at once.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows `width` bytes starting at `offset`.
    pub fn bytes_at(&self, offset: usize, width: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(width)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(Error::OutOfBounds {
                offset,
                width,
                len: self.bytes.len(),
            })
    }

    read!(read_u8, u8, |b: &[u8]| b[0]);
    read!(read_i8, i8, |b: &[u8]| b[0] as i8);
    read!(read_u16, u16, NativeEndian::read_u16);
    read!(read_i16, i16, NativeEndian::read_i16);
    read!(read_u32, u32, NativeEndian::read_u32);
    read!(read_i32, i32, NativeEndian::read_i32);
    read!(read_u64, u64, NativeEndian::read_u64);
    read!(read_i64, i64, NativeEndian::read_i64);

    /// Reads a string that ends at the first NUL byte or after `max_len` bytes, whichever comes
    /// first. Returns the string and the number of bytes it occupies, not counting the NUL.
    ///
    /// Bytes map one-to-one onto chars (Latin-1), since names in the game's tables are not UTF-8.
    pub fn read_fixed_string(&self, offset: usize, max_len: usize) -> Result<(String, usize)> {
        let available = self.bytes.len().saturating_sub(offset);
        let window = self.bytes_at(offset, max_len.min(available))?;

        match window.iter().position(|&b| b == 0) {
            Some(consumed) => Ok((latin1(&window[..consumed]), consumed)),
            None if window.len() == max_len => Ok((latin1(window), max_len)),
            // Ran off the end of the image before a terminator or the field width.
            None => Err(Error::OutOfBounds {
                offset,
                width: max_len,
                len: self.bytes.len(),
            }),
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use byteorder::WriteBytesExt;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    #[test]
    fn sequential_u16_reads_follow_returned_offset() {
        let mut data = Vec::new();
        data.write_u16::<NativeEndian>(0x1234).unwrap();
        data.write_u16::<NativeEndian>(0xbeef).unwrap();
        let cursor = ByteCursor::new(&data);

        let (first, next) = cursor.read_u16(0).unwrap();
        let (second, end) = cursor.read_u16(next).unwrap();

        assert_eq!((first, next), (0x1234, 2));
        assert_eq!((second, end), (0xbeef, 4));
    }

    #[quickcheck]
    fn u16_reread_yields_next_two_bytes(data: Vec<u8>, start: usize) -> bool {
        if data.len() < 4 {
            return true;
        }
        let offset = start % (data.len() - 3);
        let cursor = ByteCursor::new(&data);

        let (_, next) = cursor.read_u16(offset).unwrap();
        let (value, _) = cursor.read_u16(next).unwrap();

        next == offset + 2 && value == NativeEndian::read_u16(&data[offset + 2..offset + 4])
    }

    #[quickcheck]
    fn signed_widths_read_back(a: i8, b: i16, c: i32, d: i64) -> bool {
        let mut data = Vec::new();
        data.write_i8(a).unwrap();
        data.write_i16::<NativeEndian>(b).unwrap();
        data.write_i32::<NativeEndian>(c).unwrap();
        data.write_i64::<NativeEndian>(d).unwrap();
        let cursor = ByteCursor::new(&data);

        let (ra, o) = cursor.read_i8(0).unwrap();
        let (rb, o) = cursor.read_i16(o).unwrap();
        let (rc, o) = cursor.read_i32(o).unwrap();
        let (rd, o) = cursor.read_i64(o).unwrap();

        (ra, rb, rc, rd, o) == (a, b, c, d, 15)
    }

    #[quickcheck]
    fn unsigned_widths_read_back(a: u8, b: u16, c: u32, d: u64) -> bool {
        let mut data = Vec::new();
        data.write_u8(a).unwrap();
        data.write_u16::<NativeEndian>(b).unwrap();
        data.write_u32::<NativeEndian>(c).unwrap();
        data.write_u64::<NativeEndian>(d).unwrap();
        let cursor = ByteCursor::new(&data);

        let (ra, o) = cursor.read_u8(0).unwrap();
        let (rb, o) = cursor.read_u16(o).unwrap();
        let (rc, o) = cursor.read_u32(o).unwrap();
        let (rd, o) = cursor.read_u64(o).unwrap();

        (ra, rb, rc, rd, o) == (a, b, c, d, 15)
    }

    #[rstest]
    #[case::u16_at_end(7, 2)]
    #[case::u32_straddling(6, 4)]
    #[case::past_end(20, 1)]
    #[case::overflowing_offset(usize::MAX, 2)]
    fn reads_past_the_end_fail(#[case] offset: usize, #[case] width: usize) {
        let data = [0u8; 8];
        let cursor = ByteCursor::new(&data);

        let err = cursor.bytes_at(offset, width).unwrap_err();

        assert!(matches!(
            err,
            Error::OutOfBounds { offset: o, width: w, len: 8 } if o == offset && w == width
        ));
    }

    #[test]
    fn read_u64_reports_offset_on_failure() {
        let cursor = ByteCursor::new(&[0u8; 10]);
        assert_eq!(cursor.read_u64(4).unwrap_err().offset(), Some(4));
    }

    #[rstest]
    #[case::nul_terminated(b"Ring Mail\0junk".as_slice(), 36, "Ring Mail", 9)]
    #[case::fills_field(b"Abcdefgh".as_slice(), 5, "Abcde", 5)]
    #[case::empty(b"\0end".as_slice(), 36, "", 0)]
    #[case::terminator_at_image_end(b"end\0".as_slice(), 36, "end", 3)]
    fn fixed_strings(
        #[case] data: &[u8],
        #[case] max_len: usize,
        #[case] expected: &str,
        #[case] consumed: usize,
    ) {
        let cursor = ByteCursor::new(data);
        let (text, used) = cursor.read_fixed_string(0, max_len).unwrap();

        assert_eq!(text, expected);
        assert_eq!(used, consumed);
    }

    #[test]
    fn fixed_string_maps_high_bytes_to_latin1() {
        let cursor = ByteCursor::new(b"Ulm\xe9\0");
        assert_eq!(cursor.read_fixed_string(0, 36).unwrap().0, "Ulmé");
    }

    #[test]
    fn unterminated_string_at_image_end_fails() {
        let cursor = ByteCursor::new(b"xx Pyth");
        assert!(matches!(
            cursor.read_fixed_string(3, 36),
            Err(Error::OutOfBounds { offset: 3, width: 36, len: 7 })
        ));
    }
}

//! In-place reversal of NUL-terminated byte strings.
//!
//! Strings are `&[u8]` slices where the first `0x00` byte marks the logical
//! end. A slice without a NUL is treated as one string spanning the whole
//! slice.

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Reverses the bytes before the terminator in place.
///
/// The terminator (and anything after it) is left untouched.
pub fn reverse(s: &mut [u8]) {
    let len = strlen(s);
    let (mut i, mut j) = (0, len);
    while i + 1 < j {
        j -= 1;
        s.swap(i, j);
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strlen_basic() {
        assert_eq!(strlen(b"hello\0"), 5);
        assert_eq!(strlen(b"\0"), 0);
        assert_eq!(strlen(b"abc"), 3);
        assert_eq!(strlen(b"ab\0cd\0"), 2);
    }

    #[test]
    fn test_reverse_keeps_terminator() {
        let mut buf = *b"54321\0xy";
        reverse(&mut buf);
        assert_eq!(&buf, b"12345\0xy");
    }

    #[test]
    fn test_reverse_odd_and_even() {
        let mut odd = *b"abc\0";
        reverse(&mut odd);
        assert_eq!(&odd, b"cba\0");

        let mut even = *b"abcd\0";
        reverse(&mut even);
        assert_eq!(&even, b"dcba\0");
    }

    #[test]
    fn test_reverse_without_terminator() {
        let mut buf = *b"-01";
        reverse(&mut buf);
        assert_eq!(&buf, b"10-");
    }

    #[test]
    fn test_reverse_empty_and_single() {
        let mut empty = *b"\0";
        reverse(&mut empty);
        assert_eq!(&empty, b"\0");

        let mut single = *b"z\0";
        reverse(&mut single);
        assert_eq!(&single, b"z\0");
    }

    #[test]
    fn test_reverse_is_involution() {
        let samples: [&[u8]; 5] = [b"a\0", b"ab\0", b"hello\0", b"0xdeadbeef\0", b"-2147483648\0"];
        for sample in samples {
            let mut buf = sample.to_vec();
            reverse(&mut buf);
            reverse(&mut buf);
            assert_eq!(buf, sample);
        }
    }
}

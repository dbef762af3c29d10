/// Yields the same value a fixed number of times.
pub(crate) struct FixedValueIterator<T> {
    val: T,
    length: usize,
    pos: usize,
}

impl<T> FixedValueIterator<T> {
    pub(crate) fn new(val: T, length: usize) -> Self {
        Self {
            val,
            length,
            pos: 0,
        }
    }
}

impl<T> Iterator for FixedValueIterator<T>
where
    T: Copy,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.length {
            return None;
        }
        self.pos += 1;
        Some(self.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.length - self.pos;
        (size, Some(size))
    }
}

/// Reads consecutive `size`-bit unsigned integers (MSB first) from a byte
/// slice. `size` must be between 1 and 32.
#[derive(Clone)]
pub(crate) struct NBitwiseIterator<T> {
    data: T,
    size: usize,
    pos: usize,
    offset: usize,
}

impl<T> NBitwiseIterator<T> {
    pub(crate) fn new(data: T, size: usize) -> Self {
        Self {
            data,
            size,
            pos: 0,
            offset: 0,
        }
    }
}

impl<T> Iterator for NBitwiseIterator<T>
where
    T: AsRef<[u8]>,
{
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let new_offset = self.offset + self.size;
        let (new_pos, new_offset) = (self.pos + new_offset / 8, new_offset % 8);
        let slice = self.data.as_ref();

        if self.size == 0
            || self.pos >= slice.len()
            || new_pos > slice.len()
            || (new_pos == slice.len() && new_offset > 0)
        {
            return None;
        }

        let val = slice[self.pos] << self.offset >> self.offset;
        let mut val: u32 = u32::from(val);
        if new_pos == self.pos {
            val >>= 8 - new_offset;
        } else {
            let mut pos = self.pos + 1;
            while pos < new_pos {
                val = (val << 8) | u32::from(slice[pos]);
                pos += 1;
            }
            if new_offset > 0 {
                let shift = 8 - new_offset;
                let last_val = u32::from(slice[pos]) >> shift;
                val = (val << new_offset) | last_val;
            }
        }

        self.pos = new_pos;
        self.offset = new_offset;
        Some(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_nbitwise_iterator {
        ($(($name:ident, $size:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let slice: [u8; 5] = [0, 255, 255, 0, 0];
                let actual = NBitwiseIterator::new(&slice, $size).collect::<Vec<_>>();
                let expected: Vec<u32> = $expected;
                assert_eq!(actual, expected);
            }
        )*);
    }

    test_nbitwise_iterator! {
        (nbitwise_iterator_u1, 1, [
            vec![0; 8],
            vec![1; 16],
            vec![0; 16],
        ].concat()),
        (nbitwise_iterator_u5, 5, vec![0b00000, 0b00011, 0b11111, 0b11111, 0b11110, 0, 0, 0]),
        (nbitwise_iterator_u9, 9, vec![0b000000001, 0b111111111, 0b111111000, 0]),
        (nbitwise_iterator_u13, 13, vec![0b0000000011111, 0b1111111111100, 0]),
        (nbitwise_iterator_u16, 16, vec![0x00ff, 0xff00]),
        (nbitwise_iterator_u24, 24, vec![0x00ffff]),
        (nbitwise_iterator_u32, 32, vec![0x00ffff00]),
    }

    #[test]
    fn nbitwise_iterator_empty() {
        let slice: [u8; 0] = [];

        let mut iter = NBitwiseIterator::new(&slice, 8);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn nbitwise_iterator_zero_sized_stops() {
        let mut iter = NBitwiseIterator::new([0xff_u8], 0);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn fixed_value_iterator() {
        let mut iter = FixedValueIterator::new(1.5, 2);
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert_eq!(iter.next(), Some(1.5));
        assert_eq!(iter.next(), Some(1.5));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }
}

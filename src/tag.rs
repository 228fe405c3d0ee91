use crate::error::{Error, Result};

/// Bit pattern a source ORs into the slot of every value it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag(u8);

impl Tag {
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Disjoint tags for `count` sources together with the mask a slot holds
/// once every source has marked it.
///
/// The eight bits of a slot are split evenly between the sources, so two
/// sources get `0x0f` and `0xf0` with a target of `0xff`.
pub fn assign(count: usize) -> Result<(Vec<Tag>, u8)> {
    if count == 0 || count > u8::BITS as usize {
        return Err(Error::SourceCount(count));
    }
    let width = u8::BITS as usize / count;
    let pattern = ((1u16 << width) - 1) as u8;

    let tags: Vec<Tag> = (0..count)
        .map(|i| Tag(pattern << (i * width)))
        .collect();
    let target = tags.iter().fold(0, |mask, tag| mask | tag.0);

    Ok((tags, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sources() {
        let (tags, target) = assign(2).unwrap();
        assert_eq!(tags, [Tag(0x0f), Tag(0xf0)]);
        assert_eq!(target, 0xff);
    }

    #[test]
    fn test_single_source() {
        assert_eq!(assign(1).unwrap(), (vec![Tag(0xff)], 0xff));
    }

    #[test]
    fn test_three_sources() {
        let (tags, target) = assign(3).unwrap();
        assert_eq!(tags, [Tag(0x03), Tag(0x0c), Tag(0x30)]);
        assert_eq!(target, 0x3f);
    }

    #[test]
    fn test_tags_disjoint() {
        for count in 1..=8 {
            let (tags, target) = assign(count).unwrap();
            for (i, a) in tags.iter().enumerate() {
                assert_ne!(a.bits(), 0);
                for b in &tags[i + 1..] {
                    assert_eq!(a.bits() & b.bits(), 0);
                }
                // No proper subset of sources may reach the target.
                assert_ne!(target & !a.bits(), target);
            }
        }
    }

    #[test]
    fn test_bad_counts() {
        assert!(matches!(assign(0), Err(Error::SourceCount(0))));
        assert!(matches!(assign(9), Err(Error::SourceCount(9))));
    }
}

pub mod properties;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Universe used by the generated sets; small enough to scan quickly.
pub const UNIVERSE: u64 = 1 << 16;

pub fn write_values(dir: &Path, name: &str, values: &[u32]) -> PathBuf {
    let path = dir.join(name);
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&bytes).unwrap();
    path
}

pub fn read_values(path: &Path) -> Vec<u32> {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() % 4 == 0);
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes(c.try_into().unwrap()))
        .collect()
}

// Arbitrary Source //
/// Unsorted values with duplicates, as an input file would hold them.
#[derive(Debug, Clone)]
pub struct Source(Vec<u32>);

impl Source {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl quickcheck::Arbitrary for Source {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let values: Vec<u32> = Vec::arbitrary(g);
        Self(values.into_iter().map(|v| v % UNIVERSE as u32).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Source))
    }
}

// Arbitrary Collection of Sources //
/// Two to four sources sharing a common subset, with repeated values.
#[derive(Clone, Debug)]
pub struct SourceCollection {
    sources: Vec<Source>,
}

impl SourceCollection {
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

impl quickcheck::Arbitrary for SourceCollection {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let source_count = usize::arbitrary(g) % 3 + 2;
        let mutual = Source::arbitrary(g);

        let sources = (0..source_count)
            .map(|_| {
                let mut values = Source::arbitrary(g).0;
                values.extend(mutual.as_slice());
                values.extend(mutual.as_slice().iter().take(3));
                let rotate = if values.is_empty() { 0 } else { usize::arbitrary(g) % values.len() };
                values.rotate_left(rotate);
                Source(values)
            })
            .collect();

        Self { sources }
    }
}

// Arbitrary Reader Count //
#[derive(Clone, Copy, Debug)]
pub struct Readers(pub usize);

impl quickcheck::Arbitrary for Readers {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Readers(usize::arbitrary(g) % 16 + 1)
    }
}

use rayon::prelude::*;

use crate::{table::PresenceTable, visitor::Visitor};

/// Slots scanned by one parallel block.
const BLOCK_SIZE: usize = 1 << 20;
/// Blocks held in memory before their matches are handed to the visitor.
const BATCH_BLOCKS: usize = 64;

/// Emit, in strictly ascending order, every value whose slot equals
/// `target`. Returns the number of values emitted.
///
/// Blocks of a batch are scanned in parallel but visited in block order, so
/// the visitor sees the same sequence a single linear pass would produce.
pub fn extract<V>(table: &mut PresenceTable, target: u8, visitor: &mut V) -> u64
where
    V: Visitor<u32>,
{
    let slots = table.slots();
    let mut matches = 0;

    for (batch_index, batch) in slots.chunks(BLOCK_SIZE * BATCH_BLOCKS).enumerate() {
        let batch_base = batch_index * BLOCK_SIZE * BATCH_BLOCKS;

        let found: Vec<Vec<u32>> = batch
            .par_chunks(BLOCK_SIZE)
            .enumerate()
            .map(|(block_index, block)| {
                scan_block(block, batch_base + block_index * BLOCK_SIZE, target)
            })
            .collect();

        for value in found.into_iter().flatten() {
            visitor.visit(value);
            matches += 1;
        }
    }
    matches
}

fn scan_block(block: &[u8], base: usize, target: u8) -> Vec<u32> {
    let mut found = Vec::new();
    let words = block.chunks_exact(8);
    let tail = words.remainder();

    for (i, word) in words.enumerate() {
        // A zero target is matched by every empty slot, so nothing can be skipped.
        if target != 0 && u64::from_ne_bytes(word.try_into().unwrap_or([0; 8])) == 0 {
            continue;
        }
        push_matches(&mut found, word, base + i * 8, target);
    }
    push_matches(&mut found, tail, base + block.len() - tail.len(), target);
    found
}

#[inline]
fn push_matches(found: &mut Vec<u32>, slots: &[u8], base: usize, target: u8) {
    for (offset, &slot) in slots.iter().enumerate() {
        if slot == target {
            found.push((base + offset) as u32);
        }
    }
}

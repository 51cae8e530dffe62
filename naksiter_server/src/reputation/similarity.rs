//! Sequence-matcher similarity ratio
//!
//! Finds the longest common contiguous run, then recurses into the text on
//! either side of it. The ratio is `2 * M / (len(a) + len(b))` where `M` is the
//! total length of all matching blocks.

/// A matching run: `a[a_start..a_start + len] == b[b_start..b_start + len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Similarity in `[0.0, 1.0]`, symmetric in its arguments.
///
/// Greedy block matching can pick different blocks depending on argument
/// order when several runs tie, so both directions are computed and the
/// larger ratio is returned.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    directed_ratio(&a, &b).max(directed_ratio(&b, &a))
}

fn directed_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = matching_blocks(a, b).iter().map(|m| m.len).sum();
    2.0 * matched as f64 / total as f64
}

/// All non-overlapping matching blocks, ordered by position
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchBlock> {
    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, b, alo, ahi, blo, bhi);
        if block.len == 0 {
            continue;
        }

        if alo < block.a_start && blo < block.b_start {
            pending.push((alo, block.a_start, blo, block.b_start));
        }
        let a_end = block.a_start + block.len;
        let b_end = block.b_start + block.len;
        if a_end < ahi && b_end < bhi {
            pending.push((a_end, ahi, b_end, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|m| (m.a_start, m.b_start));
    blocks
}

/// Longest common run inside `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the run starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchBlock {
    let mut best = MatchBlock {
        a_start: alo,
        b_start: blo,
        len: 0,
    };

    // prev[k]: length of the run ending at (i - 1, blo + k - 1)
    let width = bhi.saturating_sub(blo);
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            if a[i] == b[j] {
                curr[k] = prev[k - 1] + 1;
                if curr[k] > best.len {
                    best = MatchBlock {
                        a_start: i + 1 - curr[k],
                        b_start: j + 1 - curr[k],
                        len: curr[k],
                    };
                }
            } else {
                curr[k] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

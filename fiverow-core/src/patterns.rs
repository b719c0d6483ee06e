//! Line motifs and their weights
//!
//! A motif is a short run of symbols read relative to the side being
//! evaluated: `Mine`, `Theirs` or `Open`. Each occurrence in a line adds the
//! motif's weight. Threats by the opponent weigh more than the mirrored
//! threat by the player, so the evaluation leans towards defence.

use crate::board::{Cell, Player};
use crate::eval::WIN_VALUE;

/// A cell seen from one side's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sym {
    Mine,
    Theirs,
    Open,
}

impl Sym {
    pub fn classify(cell: Cell, player: Player) -> Sym {
        match cell {
            Cell::Empty => Sym::Open,
            Cell::Stone(p) if p == player => Sym::Mine,
            Cell::Stone(_) => Sym::Theirs,
        }
    }
}

/// Weighted symbol sequence
#[derive(Clone, Copy, Debug)]
pub struct Motif {
    pub name: &'static str,
    pub pattern: &'static [Sym],
    pub weight: i32,
}

const M: Sym = Sym::Mine;
const T: Sym = Sym::Theirs;
const E: Sym = Sym::Open;

const fn motif(name: &'static str, pattern: &'static [Sym], weight: i32) -> Motif {
    Motif { name, pattern, weight }
}

// ============================================================================
// MOTIF TABLE
// ============================================================================

pub const MOTIFS: &[Motif] = &[
    // Player
    motif("five", &[M, M, M, M, M], WIN_VALUE),
    motif("four", &[M, M, M, M, E], 1000),
    motif("four", &[E, M, M, M, M], 1000),
    motif("open three", &[E, M, M, M, E], 100),
    motif("split three", &[M, E, M, M], 70),
    motif("split three", &[M, M, E, M], 70),
    motif("three", &[M, M, M, E, E], 50),
    motif("three", &[E, E, M, M, M], 50),
    motif("two", &[M, M, E, E, E], 10),
    motif("two", &[E, M, M, E, E], 10),
    motif("two", &[E, E, M, M, E], 10),
    motif("two", &[E, E, E, M, M], 10),
    motif("one", &[M, E, E, E, E], 1),
    motif("one", &[E, M, E, E, E], 1),
    motif("one", &[E, E, M, E, E], 1),
    motif("one", &[E, E, E, M, E], 1),
    motif("one", &[E, E, E, E, M], 1),
    motif("broken four", &[M, M, M, E, M, E], 90),
    motif("broken four", &[E, M, E, M, M, M], 90),
    motif("broken four", &[M, E, M, M, M, E], 90),
    motif("broken four", &[E, M, M, M, E, M], 90),
    motif("stepping three", &[M, E, M, E, M], 80),
    motif("stepping three", &[E, M, E, M, E, M], 80),
    motif("stepping three", &[M, E, M, E, M, E], 80),
    // Opponent
    motif("their five", &[T, T, T, T, T], -WIN_VALUE),
    motif("their four", &[T, T, T, T, E], -2000),
    motif("their four", &[E, T, T, T, T], -2000),
    motif("their broken four", &[T, T, T, E, T], -2000),
    motif("their broken four", &[T, E, T, T, T], -2000),
    motif("their stepping three", &[T, E, T, E, T], -100),
    motif("their stepping three", &[E, T, E, T, E, T], -100),
    motif("their stepping three", &[T, E, T, E, T, E], -100),
    motif("their split three", &[T, T, E, T], -1000),
    motif("their split three", &[T, E, T, T], -1000),
    motif("their open three", &[E, T, T, T, E], -500),
    motif("their three", &[T, T, T, E, E], -500),
    motif("their three", &[E, E, T, T, T], -500),
    motif("their two", &[T, T, E, E, E], -10),
    motif("their two", &[E, T, T, E, E], -10),
    motif("their two", &[E, E, T, T, E], -10),
    motif("their two", &[E, E, E, T, T], -10),
    motif("their one", &[T, E, E, E, E], -1),
    motif("their one", &[E, T, E, E, E], -1),
    motif("their one", &[E, E, T, E, E], -1),
    motif("their one", &[E, E, E, T, E], -1),
    motif("their one", &[E, E, E, E, T], -1),
    // Blocking
    motif("blocked three", &[T, M, M, M], -60),
    motif("blocked three", &[M, M, M, T], -60),
    motif("capped three", &[M, T, T, T], 150),
    motif("capped three", &[T, T, T, M], 150),
    // Mixed: both sides in one window, read the same in either direction
    motif("hemmed two", &[T, E, M, M], -20),
    motif("hemmed two", &[M, M, E, T], -20),
    motif("pinned one", &[T, E, M, E, T], -40),
    motif("two facing two", &[M, M, E, T, T], -40),
    motif("two facing two", &[T, T, E, M, M], -40),
    motif("three facing one", &[M, M, M, E, T], 150),
    motif("three facing one", &[T, E, M, M, M], 150),
    motif("four facing one", &[M, M, M, M, E, T], 4000),
    motif("four facing one", &[T, E, M, M, M, M], 4000),
    motif("three facing two", &[M, M, M, E, T, T], 300),
    motif("three facing two", &[T, T, E, M, M, M], 300),
    motif("two facing three", &[M, M, E, T, T, T], 20),
    motif("two facing three", &[T, T, T, E, M, M], 20),
];

/// Occurrences of `pattern` in `line`, scanning left to right and resuming
/// after each match so no cell is counted twice for the same motif.
pub fn count_non_overlapping(line: &[Sym], pattern: &[Sym]) -> usize {
    let len = pattern.len();
    if len == 0 || line.len() < len {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + len <= line.len() {
        if &line[i..i + len] == pattern {
            count += 1;
            i += len;
        } else {
            i += 1;
        }
    }
    count
}

/// Sum of motif weights over one line of symbols
pub fn score_symbols(line: &[Sym]) -> i32 {
    MOTIFS
        .iter()
        .map(|m| count_non_overlapping(line, m.pattern) as i32 * m.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(s: &str) -> Vec<Sym> {
        s.chars()
            .map(|c| match c {
                'M' => M,
                'T' => T,
                _ => E,
            })
            .collect()
    }

    fn score(s: &str) -> i32 {
        score_symbols(&syms(s))
    }

    fn weight_of(pattern: &[Sym]) -> i32 {
        MOTIFS
            .iter()
            .find(|m| m.pattern == pattern)
            .map(|m| m.weight)
            .unwrap()
    }

    fn mirror(pattern: &[Sym]) -> Vec<Sym> {
        pattern
            .iter()
            .map(|s| match s {
                Sym::Mine => Sym::Theirs,
                Sym::Theirs => Sym::Mine,
                Sym::Open => Sym::Open,
            })
            .collect()
    }

    #[test]
    fn test_count_non_overlapping() {
        assert_eq!(count_non_overlapping(&syms("MMMMMM"), &syms("MMMMM")), 1);
        assert_eq!(count_non_overlapping(&syms("MM.MM.M"), &syms("MM.M")), 1);
        assert_eq!(count_non_overlapping(&syms(".M...M..."), &syms(".M...")), 1);
        assert_eq!(count_non_overlapping(&syms(".M....M..."), &syms(".M...")), 2);
        assert_eq!(count_non_overlapping(&syms("MMM"), &syms("MMMMM")), 0);
    }

    #[test]
    fn test_relative_ordering() {
        let five = weight_of(&syms("MMMMM"));
        let four = weight_of(&syms("MMMM."));
        let three = weight_of(&syms(".MMM."));
        let two = weight_of(&syms(".MM.."));
        let one = weight_of(&syms("..M.."));
        assert!(five > four && four > three && three > two && two > one && one > 0);

        // One move from five beats an open three, in either direction
        let open_three = score(".MMM..");
        assert_eq!(open_three, 150);
        assert!(score("MMM.M.") > open_three);
        assert!(score(".M.MMM") > open_three);
        assert!(score(".MMM.M") > open_three);
        assert!(score(".MMMM") > score("MMM.M."));

        // Same for the opponent
        assert!(score("TTT.T") < score(".TTT.."));
        assert!(score("T.TTT") < score(".TTT.."));
    }

    #[test]
    fn test_threats_outweigh_mirrored_offence() {
        for m in MOTIFS.iter().filter(|m| !m.pattern.contains(&Sym::Theirs)) {
            let ours = score_symbols(m.pattern);
            let theirs = score_symbols(&mirror(m.pattern));
            assert!(
                theirs <= -ours,
                "{} scores {}, mirrored {}",
                m.name,
                ours,
                theirs
            );
        }
    }

    #[test]
    fn test_mixed_motifs_read_both_ways() {
        for m in MOTIFS.iter().filter(|m| {
            m.pattern.contains(&Sym::Mine) && m.pattern.contains(&Sym::Theirs)
        }) {
            let reversed: Vec<Sym> = m.pattern.iter().rev().copied().collect();
            assert_eq!(
                score_symbols(m.pattern),
                score_symbols(&reversed),
                "{}",
                m.name
            );
        }
    }

    #[test]
    fn test_blocking_motifs() {
        // Our three capped by their stone loses value
        let open = score_symbols(&syms(".MMM.."));
        let capped = score_symbols(&syms("TMMM.."));
        assert!(capped < open);

        // Their three capped by our stone hurts less than a free one
        let free = score_symbols(&syms("..TTT."));
        let blocked = score_symbols(&syms("..TTTM"));
        assert!(blocked > free);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Sym::classify(Cell::Empty, Player::X), Sym::Open);
        assert_eq!(Sym::classify(Cell::Stone(Player::X), Player::X), Sym::Mine);
        assert_eq!(Sym::classify(Cell::Stone(Player::O), Player::X), Sym::Theirs);
    }
}

//! Sample trees that show off each rotation

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Full tree of height 3, no rotation needed
    Balanced,
    /// Single right rotation
    LeftLeft,
    /// Single left rotation
    RightRight,
    /// Left rotation of the left child, then right rotation
    LeftRight,
    /// Right rotation of the right child, then left rotation
    RightLeft,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Balanced,
        Preset::LeftLeft,
        Preset::RightRight,
        Preset::LeftRight,
        Preset::RightLeft,
    ];

    /// Keys in insertion order.
    pub fn keys(self) -> &'static [i32] {
        match self {
            Preset::Balanced => &[50, 30, 70, 20, 40, 60, 80],
            Preset::LeftLeft => &[50, 30, 20, 10],
            Preset::RightRight => &[10, 20, 30, 40],
            Preset::LeftRight => &[50, 20, 30],
            Preset::RightLeft => &[20, 40, 30],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Preset::Balanced => "Simple balanced tree",
            Preset::LeftLeft => "Single right rotation (LL)",
            Preset::RightRight => "Single left rotation (RR)",
            Preset::LeftRight => "Double left-right rotation (LR)",
            Preset::RightLeft => "Double right-left rotation (RL)",
        }
    }

    /// Preset for a 1-based menu choice.
    pub fn from_choice(choice: usize) -> Option<Preset> {
        choice.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tree;

    #[test]
    fn presets_end_balanced() {
        for preset in Preset::ALL {
            let tree: Tree = preset.keys().iter().copied().collect();
            tree.check_consistency();
            assert_eq!(tree.len(), preset.keys().len());
        }
    }

    #[test]
    fn from_choice() {
        assert_eq!(Preset::from_choice(1), Some(Preset::Balanced));
        assert_eq!(Preset::from_choice(5), Some(Preset::RightLeft));
        assert_eq!(Preset::from_choice(0), None);
        assert_eq!(Preset::from_choice(6), None);
    }
}

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Lattice axis for planes, rotations and projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into an `IVec3` (X = 0, Y = 1, Z = 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis.
    #[inline]
    pub fn unit(self) -> IVec3 {
        match self {
            Axis::X => IVec3::X,
            Axis::Y => IVec3::Y,
            Axis::Z => IVec3::Z,
        }
    }

    /// The two axes spanning the plane perpendicular to this one,
    /// in the canonical face-key order: X -> (Y, Z), Y -> (X, Z), Z -> (X, Y).
    #[inline]
    pub fn plane_axes(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(Axis::X),
            'y' | 'Y' => Some(Axis::Y),
            'z' | 'Z' => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index() {
        assert_eq!(Axis::X.index(), 0);
        assert_eq!(Axis::Y.index(), 1);
        assert_eq!(Axis::Z.index(), 2);
    }

    #[test]
    fn test_plane_axes_order() {
        assert_eq!(Axis::X.plane_axes(), (Axis::Y, Axis::Z));
        assert_eq!(Axis::Y.plane_axes(), (Axis::X, Axis::Z));
        assert_eq!(Axis::Z.plane_axes(), (Axis::X, Axis::Y));
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Axis::from_char('x'), Some(Axis::X));
        assert_eq!(Axis::from_char('Z'), Some(Axis::Z));
        assert_eq!(Axis::from_char('w'), None);
    }
}

//! Vector/codon model: the 21 movement primitives and their encoding.
//!
//! Purpose
//! - Fixed palette of movement vectors (8 compass directions in up to
//!   three length classes, plus a terminal Stop), each spelled by a set
//!   of synonymous 3-letter codons over {T,C,A,G}.
//! - `coherent` answers whether three consecutive vectors read as one
//!   smooth run; the verdict table is fixed domain data, shared and
//!   read-only.
//!
//! Everything here is a pure lookup. An out-of-range vector id is a
//! programming error and panics via the table index, not a recoverable
//! condition.

use std::fmt;

use rand::Rng;

use crate::geometry::Vec2;

mod tables;

/// Metric length of a short vector.
pub const SHORT_LEN: f64 = 1.0;
/// Metric length of a medium vector (`e^0.5`, matching the host
/// simulation's double-precision constant).
pub const MEDIUM_LEN: f64 = 1.648_721_270_700_128;
/// Metric length of a long vector (`e`, same precision note).
pub const LONG_LEN: f64 = 2.718_281_828_459_05;

/// Per-axis step of a short diagonal vector (`1/sqrt(2)`).
pub const DIAG_STEP_SHORT: f64 = 0.707_106_781_186_548;
/// Per-axis step of a medium diagonal vector.
pub const DIAG_STEP_MEDIUM: f64 = 1.165_821_990_798_562;

/// Compass direction. `Stop` is direction 0; the eight movement
/// directions are numbered 1..=8 clockwise from North.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Stop = 0,
    North = 1,
    Northeast = 2,
    East = 3,
    Southeast = 4,
    South = 5,
    Southwest = 6,
    West = 7,
    Northwest = 8,
}

impl Direction {
    const ALL: [Direction; 9] = [
        Direction::Stop,
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    const NAMES: [&'static str; 9] = ["STP", "No", "Ne", "Ea", "Se", "So", "Sw", "We", "Nw"];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Rotate clockwise by `n` eighth-turns. Valid for the eight
    /// movement directions only.
    #[inline]
    pub fn add(self, n: u8) -> Direction {
        debug_assert!(self != Direction::Stop);
        Self::ALL[((self as u8 - 1 + n) % 8 + 1) as usize]
    }

    /// Rotate counterclockwise by `n` eighth-turns.
    #[inline]
    pub fn sub(self, n: u8) -> Direction {
        debug_assert!(self != Direction::Stop);
        Self::ALL[((self as u8 - 1 + 8 - n % 8) % 8 + 1) as usize]
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Stop => Direction::Stop,
            d => d.add(4),
        }
    }

    /// Nearest compass direction of a displacement (45-degree sectors
    /// centered on each direction). `None` for a zero displacement.
    pub fn from_delta(delta: Vec2) -> Option<Direction> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        let angle = delta.y.atan2(delta.x); // radians, East = 0, CCW
        let octant = (angle / std::f64::consts::FRAC_PI_4).round() as i32;
        // CCW octants from East map onto the clockwise compass ids.
        const BY_OCTANT: [Direction; 8] = [
            Direction::East,
            Direction::Northeast,
            Direction::North,
            Direction::Northwest,
            Direction::West,
            Direction::Southwest,
            Direction::South,
            Direction::Southeast,
        ];
        Some(BY_OCTANT[octant.rem_euclid(8) as usize])
    }
}

/// Length class of a movement vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LengthClass {
    Short,
    Medium,
    Long,
}

impl LengthClass {
    #[inline]
    pub fn metric(self) -> f64 {
        match self {
            LengthClass::Short => SHORT_LEN,
            LengthClass::Medium => MEDIUM_LEN,
            LengthClass::Long => LONG_LEN,
        }
    }
}

/// Identifier of one of the 21 movement vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VectorId(u8);

impl VectorId {
    pub const STOP: VectorId = tables::STOP;

    /// Vector for a direction and length class. The four diagonal
    /// directions have no long class, and `Stop` only exists short;
    /// asking for a missing combination is a programming error.
    pub fn new(direction: Direction, class: LengthClass) -> VectorId {
        let per_dir: &[VectorId] = match direction {
            Direction::Stop => &[tables::STOP],
            Direction::North => &[tables::NO_S, tables::NO_M, tables::NO_L],
            Direction::Northeast => &[tables::NE_S, tables::NE_M],
            Direction::East => &[tables::EA_S, tables::EA_M, tables::EA_L],
            Direction::Southeast => &[tables::SE_S, tables::SE_M],
            Direction::South => &[tables::SO_S, tables::SO_M, tables::SO_L],
            Direction::Southwest => &[tables::SW_S, tables::SW_M],
            Direction::West => &[tables::WE_S, tables::WE_M, tables::WE_L],
            Direction::Northwest => &[tables::NW_S, tables::NW_M],
        };
        let slot = match class {
            LengthClass::Short => 0,
            LengthClass::Medium => 1,
            LengthClass::Long => 2,
        };
        per_dir[slot]
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn vector(self) -> &'static Vector {
        &VECTORS[self.index()]
    }

    #[inline]
    pub fn direction(self) -> Direction {
        self.vector().direction
    }

    #[inline]
    pub fn length_class(self) -> LengthClass {
        self.vector().class
    }

    #[inline]
    pub fn opposite(self) -> VectorId {
        match self.direction() {
            Direction::Stop => VectorId::STOP,
            d => VectorId::new(d.opposite(), self.length_class()),
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.vector().name
    }
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static record of one movement vector.
#[derive(Debug)]
pub struct Vector {
    pub id: VectorId,
    pub name: &'static str,
    pub direction: Direction,
    pub class: LengthClass,
    /// Metric length (diagonal steps are scaled so this matches the
    /// axis vector of the same class).
    pub length: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    #[inline]
    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// Synonymous codons spelling this vector.
    #[inline]
    pub fn codons(&self) -> &'static [&'static [u8; 3]] {
        tables::SYNONYMS[self.id.index()]
    }
}

macro_rules! vector_entry {
    ($id:expr, $name:literal, $dir:ident, $class:ident, $len:expr, $dx:expr, $dy:expr) => {
        Vector {
            id: VectorId($id),
            name: $name,
            direction: Direction::$dir,
            class: LengthClass::$class,
            length: $len,
            dx: $dx,
            dy: $dy,
        }
    };
}

/// All 21 vectors, indexed by id.
pub static VECTORS: [Vector; 21] = [
    vector_entry!(0, "STP", Stop, Short, 0.0, 0.0, 0.0),
    vector_entry!(1, "Nos", North, Short, SHORT_LEN, 0.0, SHORT_LEN),
    vector_entry!(2, "Nom", North, Medium, MEDIUM_LEN, 0.0, MEDIUM_LEN),
    vector_entry!(3, "Nol", North, Long, LONG_LEN, 0.0, LONG_LEN),
    vector_entry!(4, "Nes", Northeast, Short, SHORT_LEN, DIAG_STEP_SHORT, DIAG_STEP_SHORT),
    vector_entry!(5, "Nem", Northeast, Medium, MEDIUM_LEN, DIAG_STEP_MEDIUM, DIAG_STEP_MEDIUM),
    vector_entry!(6, "Eas", East, Short, SHORT_LEN, SHORT_LEN, 0.0),
    vector_entry!(7, "Eam", East, Medium, MEDIUM_LEN, MEDIUM_LEN, 0.0),
    vector_entry!(8, "Eal", East, Long, LONG_LEN, LONG_LEN, 0.0),
    vector_entry!(9, "Ses", Southeast, Short, SHORT_LEN, DIAG_STEP_SHORT, -DIAG_STEP_SHORT),
    vector_entry!(10, "Sem", Southeast, Medium, MEDIUM_LEN, DIAG_STEP_MEDIUM, -DIAG_STEP_MEDIUM),
    vector_entry!(11, "Sos", South, Short, SHORT_LEN, 0.0, -SHORT_LEN),
    vector_entry!(12, "Som", South, Medium, MEDIUM_LEN, 0.0, -MEDIUM_LEN),
    vector_entry!(13, "Sol", South, Long, LONG_LEN, 0.0, -LONG_LEN),
    vector_entry!(14, "Sws", Southwest, Short, SHORT_LEN, -DIAG_STEP_SHORT, -DIAG_STEP_SHORT),
    vector_entry!(15, "Swm", Southwest, Medium, MEDIUM_LEN, -DIAG_STEP_MEDIUM, -DIAG_STEP_MEDIUM),
    vector_entry!(16, "Wes", West, Short, SHORT_LEN, -SHORT_LEN, 0.0),
    vector_entry!(17, "Wem", West, Medium, MEDIUM_LEN, -MEDIUM_LEN, 0.0),
    vector_entry!(18, "Wel", West, Long, LONG_LEN, -LONG_LEN, 0.0),
    vector_entry!(19, "Nws", Northwest, Short, SHORT_LEN, -DIAG_STEP_SHORT, DIAG_STEP_SHORT),
    vector_entry!(20, "Nwm", Northwest, Medium, MEDIUM_LEN, -DIAG_STEP_MEDIUM, DIAG_STEP_MEDIUM),
];

/// A three-base codon over {T,C,A,G}.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codon([u8; 3]);

/// The fixed leading codon of every assembled sequence.
pub const START_CODON: Codon = Codon(*b"ATG");

impl Codon {
    /// Build from raw bases; `None` if any byte is not one of T/C/A/G.
    pub fn from_bytes(bases: [u8; 3]) -> Option<Codon> {
        if bases.iter().all(|b| matches!(b, b'T' | b'C' | b'A' | b'G')) {
            Some(Codon(bases))
        } else {
            None
        }
    }

    #[inline]
    pub fn bases(self) -> [u8; 3] {
        self.0
    }

    pub fn as_str(&self) -> &str {
        // Bases are ASCII by construction.
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Base-4 value with T=0, C=1, A=2, G=3.
    #[inline]
    pub fn value(self) -> usize {
        self.0.iter().fold(0, |acc, &b| {
            acc * 4
                + match b {
                    b'T' => 0,
                    b'C' => 1,
                    b'A' => 2,
                    b'G' => 3,
                    _ => unreachable!("validated on construction"),
                }
        })
    }
}

impl std::str::FromStr for Codon {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| crate::error::Error::specification(s))?;
        Codon::from_bytes(bytes).ok_or_else(|| crate::error::Error::specification(s))
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codon({})", self.as_str())
    }
}

/// Vector spelled by a codon. Total: every codon decodes to exactly
/// one vector.
#[inline]
pub fn decode(codon: Codon) -> VectorId {
    tables::CODON_TO_VECTOR[codon.value()]
}

/// One of the vector's synonymous codons, chosen uniformly at random.
/// The nondeterminism is intentional: synonym choice is free variation
/// the downstream simulation may act on.
pub fn encode<R: Rng + ?Sized>(id: VectorId, rng: &mut R) -> Codon {
    let synonyms = id.vector().codons();
    Codon(*synonyms[rng.gen_range(0..synonyms.len())])
}

/// Coherence verdict for three consecutive vectors.
#[inline]
pub fn coherent(v1: VectorId, v2: VectorId, v3: VectorId) -> bool {
    (tables::COHERENCE[v1.index()][v2.index()] >> v3.index()) & 1 == 1
}

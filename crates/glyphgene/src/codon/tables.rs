//! Opaque static data for the vector/codon model.
//!
//! All three tables are domain data ported as-is, not derived from a
//! formula: the codon-to-vector map (base-4 order over T,C,A,G), the
//! synonym set of each vector, and the three-vector coherence table.
//! The coherence table is stored as 21x21 rows of 21-bit masks: bit
//! `v3` of `COHERENCE[v1][v2]` answers `coherent(v1, v2, v3)`.
//!
//! Consistency between the codon map and the synonym sets is asserted
//! by tests in `codon::tests`.

use super::VectorId;

pub(super) const STOP: VectorId = VectorId(0);
pub(super) const NO_S: VectorId = VectorId(1);
pub(super) const NO_M: VectorId = VectorId(2);
pub(super) const NO_L: VectorId = VectorId(3);
pub(super) const NE_S: VectorId = VectorId(4);
pub(super) const NE_M: VectorId = VectorId(5);
pub(super) const EA_S: VectorId = VectorId(6);
pub(super) const EA_M: VectorId = VectorId(7);
pub(super) const EA_L: VectorId = VectorId(8);
pub(super) const SE_S: VectorId = VectorId(9);
pub(super) const SE_M: VectorId = VectorId(10);
pub(super) const SO_S: VectorId = VectorId(11);
pub(super) const SO_M: VectorId = VectorId(12);
pub(super) const SO_L: VectorId = VectorId(13);
pub(super) const SW_S: VectorId = VectorId(14);
pub(super) const SW_M: VectorId = VectorId(15);
pub(super) const WE_S: VectorId = VectorId(16);
pub(super) const WE_M: VectorId = VectorId(17);
pub(super) const WE_L: VectorId = VectorId(18);
pub(super) const NW_S: VectorId = VectorId(19);
pub(super) const NW_M: VectorId = VectorId(20);

/// Vector for each of the 64 codons, indexed by the codon's base-4
/// value (T=0, C=1, A=2, G=3).
pub(super) const CODON_TO_VECTOR: [VectorId; 64] = [
    NO_L,  // 00 TTT
    NO_L,  // 01 TTC
    NO_M,  // 02 TTA
    NO_M,  // 03 TTG
    SE_M,  // 04 TCT
    SE_M,  // 05 TCC
    SE_M,  // 06 TCA
    SE_M,  // 07 TCG
    SO_L,  // 08 TAT
    SO_L,  // 09 TAC
    STOP,  // 10 TAA
    STOP,  // 11 TAG
    NW_M,  // 12 TGT
    NW_M,  // 13 TGC
    STOP,  // 14 TGA
    NW_M,  // 15 TGG
    NO_S,  // 16 CTT
    NO_S,  // 17 CTC
    NO_S,  // 18 CTA
    NO_S,  // 19 CTG
    SE_S,  // 20 CCT
    SE_S,  // 21 CCC
    SE_S,  // 22 CCA
    SE_S,  // 23 CCG
    SO_M,  // 24 CAT
    SO_M,  // 25 CAC
    SO_S,  // 26 CAA
    SO_S,  // 27 CAG
    NW_S,  // 28 CGT
    NW_S,  // 29 CGC
    NW_S,  // 30 CGA
    NW_S,  // 31 CGG
    NE_M,  // 32 ATT
    NE_M,  // 33 ATC
    NE_M,  // 34 ATA
    NE_M,  // 35 ATG
    EA_L,  // 36 ACT
    EA_L,  // 37 ACC
    EA_M,  // 38 ACA
    EA_M,  // 39 ACG
    SW_M,  // 40 AAT
    SW_M,  // 41 AAC
    SW_M,  // 42 AAA
    SW_M,  // 43 AAG
    WE_L,  // 44 AGT
    WE_L,  // 45 AGC
    WE_M,  // 46 AGA
    WE_M,  // 47 AGG
    NE_S,  // 48 GTT
    NE_S,  // 49 GTC
    NE_S,  // 50 GTA
    NE_S,  // 51 GTG
    EA_S,  // 52 GCT
    EA_S,  // 53 GCC
    EA_S,  // 54 GCA
    EA_S,  // 55 GCG
    SW_S,  // 56 GAT
    SW_S,  // 57 GAC
    SW_S,  // 58 GAA
    SW_S,  // 59 GAG
    WE_S,  // 60 GGT
    WE_S,  // 61 GGC
    WE_S,  // 62 GGA
    WE_S,  // 63 GGG
];

/// Synonymous codons per vector, indexed by vector id.
pub(super) const SYNONYMS: [&[&[u8; 3]]; 21] = [
    &[b"TAA", b"TAG", b"TGA"],
    &[b"CTT", b"CTC", b"CTA", b"CTG"],
    &[b"TTA", b"TTG"],
    &[b"TTT", b"TTC"],
    &[b"GTT", b"GTC", b"GTA", b"GTG"],
    &[b"ATT", b"ATC", b"ATA", b"ATG"],
    &[b"GCT", b"GCC", b"GCA", b"GCG"],
    &[b"ACA", b"ACG"],
    &[b"ACT", b"ACC"],
    &[b"CCT", b"CCC", b"CCA", b"CCG"],
    &[b"TCT", b"TCC", b"TCA", b"TCG"],
    &[b"CAA", b"CAG"],
    &[b"CAT", b"CAC"],
    &[b"TAT", b"TAC"],
    &[b"GAT", b"GAC", b"GAA", b"GAG"],
    &[b"AAT", b"AAC", b"AAA", b"AAG"],
    &[b"GGT", b"GGC", b"GGA", b"GGG"],
    &[b"AGA", b"AGG"],
    &[b"AGT", b"AGC"],
    &[b"CGT", b"CGC", b"CGA", b"CGG"],
    &[b"TGT", b"TGC", b"TGG"],
];

/// Coherence verdicts for every (v1, v2, v3) triple; bit v3 of row
/// [v1][v2]. Stop rows and columns are uniformly false.
pub(super) const COHERENCE: [[u32; 21]; 21] = [
    // first = STP
    [0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000],
    // first = Nos
    [0x000000, 0x1F01FE, 0x1F01FE, 0x1F01FE, 0x1801FE, 0x1801FE, 0x0001FE, 0x0001FE, 0x0001FE, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x1F000E, 0x1F000E, 0x1F000E, 0x1F003E, 0x1F003E],
    // first = Nom
    [0x000000, 0x1F01FE, 0x1F01FE, 0x1F01FE, 0x1801FE, 0x1801FE, 0x0001FE, 0x0001FE, 0x0001FE, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x1F000E, 0x1F000E, 0x1F000E, 0x1F003E, 0x1F003E],
    // first = Nol
    [0x000000, 0x1F01FE, 0x1F01FE, 0x1F01FE, 0x1801FE, 0x1801FE, 0x0001FE, 0x0001FE, 0x0001FE, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x1F000E, 0x1F000E, 0x1F000E, 0x1F003E, 0x1F003E],
    // first = Nes
    [0x000000, 0x1801FE, 0x1801FE, 0x1801FE, 0x1807FE, 0x1807FE, 0x0007FE, 0x0007FE, 0x0007FE, 0x0007F0, 0x0007F0, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x18003E, 0x18003E],
    // first = Nem
    [0x000000, 0x1801FE, 0x1801FE, 0x1801FE, 0x1807FE, 0x1807FE, 0x0007FE, 0x0007FE, 0x0007FE, 0x0007F0, 0x0007F0, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x18003E, 0x18003E],
    // first = Eas
    [0x000000, 0x0001FE, 0x0001FE, 0x0001FE, 0x0007FE, 0x0007FE, 0x003FFE, 0x003FFE, 0x003FFE, 0x003FF0, 0x003FF0, 0x003FC0, 0x003FC0, 0x003FC0, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000],
    // first = Eam
    [0x000000, 0x0001FE, 0x0001FE, 0x0001FE, 0x0007FE, 0x0007FE, 0x003FFE, 0x003FFE, 0x003FFE, 0x003FF0, 0x003FF0, 0x003FC0, 0x003FC0, 0x003FC0, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000],
    // first = Eal
    [0x000000, 0x0001FE, 0x0001FE, 0x0001FE, 0x0007FE, 0x0007FE, 0x003FFE, 0x003FFE, 0x003FFE, 0x003FF0, 0x003FF0, 0x003FC0, 0x003FC0, 0x003FC0, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000],
    // first = Ses
    [0x000000, 0x000000, 0x000000, 0x000000, 0x0007F0, 0x0007F0, 0x003FF0, 0x003FF0, 0x003FF0, 0x00FFF0, 0x00FFF0, 0x00FFC0, 0x00FFC0, 0x00FFC0, 0x00FE00, 0x00FE00, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000],
    // first = Sem
    [0x000000, 0x000000, 0x000000, 0x000000, 0x0007F0, 0x0007F0, 0x003FF0, 0x003FF0, 0x003FF0, 0x00FFF0, 0x00FFF0, 0x00FFC0, 0x00FFC0, 0x00FFC0, 0x00FE00, 0x00FE00, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000],
    // first = Sos
    [0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x003FC0, 0x003FC0, 0x003FC0, 0x00FFC0, 0x00FFC0, 0x07FFC0, 0x07FFC0, 0x07FFC0, 0x07FE00, 0x07FE00, 0x07F800, 0x07F800, 0x07F800, 0x000000, 0x000000],
    // first = Som
    [0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x003FC0, 0x003FC0, 0x003FC0, 0x00FFC0, 0x00FFC0, 0x07FFC0, 0x07FFC0, 0x07FFC0, 0x07FE00, 0x07FE00, 0x07F800, 0x07F800, 0x07F800, 0x000000, 0x000000],
    // first = Sol
    [0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x003FC0, 0x003FC0, 0x003FC0, 0x00FFC0, 0x00FFC0, 0x07FFC0, 0x07FFC0, 0x07FFC0, 0x07FE00, 0x07FE00, 0x07F800, 0x07F800, 0x07F800, 0x000000, 0x000000],
    // first = Sws
    [0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x00FE00, 0x00FE00, 0x07FE00, 0x07FE00, 0x07FE00, 0x1FFE00, 0x1FFE00, 0x1FF800, 0x1FF800, 0x1FF800, 0x1FC000, 0x1FC000],
    // first = Swm
    [0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x00FE00, 0x00FE00, 0x07FE00, 0x07FE00, 0x07FE00, 0x1FFE00, 0x1FFE00, 0x1FF800, 0x1FF800, 0x1FF800, 0x1FC000, 0x1FC000],
    // first = Wes
    [0x000000, 0x1F000E, 0x1F000E, 0x1F000E, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x07F800, 0x07F800, 0x07F800, 0x1FF800, 0x1FF800, 0x1FF80E, 0x1FF80E, 0x1FF80E, 0x1FC00E, 0x1FC00E],
    // first = Wem
    [0x000000, 0x1F000E, 0x1F000E, 0x1F000E, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x07F800, 0x07F800, 0x07F800, 0x1FF800, 0x1FF800, 0x1FF80E, 0x1FF80E, 0x1FF80E, 0x1FC00E, 0x1FC00E],
    // first = Wel
    [0x000000, 0x1F000E, 0x1F000E, 0x1F000E, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x07F800, 0x07F800, 0x07F800, 0x1FF800, 0x1FF800, 0x1FF80E, 0x1FF80E, 0x1FF80E, 0x1FC00E, 0x1FC00E],
    // first = Nws
    [0x000000, 0x1F003E, 0x1F003E, 0x1F003E, 0x18003E, 0x18003E, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x1FC000, 0x1FC000, 0x1FC00E, 0x1FC00E, 0x1FC00E, 0x1FC03E, 0x1FC03E],
    // first = Nwm
    [0x000000, 0x1F003E, 0x1F003E, 0x1F003E, 0x18003E, 0x18003E, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x1FC000, 0x1FC000, 0x1FC00E, 0x1FC00E, 0x1FC00E, 0x1FC03E, 0x1FC03E],
];

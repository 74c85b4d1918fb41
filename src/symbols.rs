//! Symbolic operands: condition codes, system-operation selectors, control
//! registers, and alias markers.

/// A symbolic operand.
///
/// Condition codes are accepted where an encoding carries a condition field.
/// Operation selectors name cache/TLB/barrier/system operations and encode
/// through the symbol value table. [`Symbol::INVERTED`] and
/// [`Symbol::LOGICAL`] are alias markers: they select an encoding variant
/// and never encode a field themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum Symbol {
    // Condition codes.
    EQ = 1,
    NE = 2,
    CS = 3,
    CC = 4,
    MI = 5,
    PL = 6,
    VS = 7,
    VC = 8,
    HI = 9,
    LS = 10,
    GE = 11,
    LT = 12,
    GT = 13,
    LE = 14,
    AL = 15,
    NV = 16,

    // Literals.
    RCTX = 17,
    IVAU = 18,
    INVERTED = 19,
    LOGICAL = 20,
    CSYNC = 21,

    // Control registers.
    C0 = 22,
    C1 = 23,
    C2 = 24,
    C3 = 25,
    C4 = 26,
    C5 = 27,
    C6 = 28,
    C7 = 29,
    C8 = 30,
    C9 = 31,
    C10 = 32,
    C11 = 33,
    C12 = 34,
    C13 = 35,
    C14 = 36,
    C15 = 37,

    // Address translation.
    S1E1R = 38,
    S1E1W = 39,
    S1E0R = 40,
    S1E0W = 41,
    S1E2R = 42,
    S1E2W = 43,
    S12E1R = 44,
    S12E1W = 45,
    S12E0R = 46,
    S12E0W = 47,
    S1E3R = 48,
    S1E3W = 49,
    S1E1RP = 50,
    S1E1WP = 51,

    // Instruction cache.
    IALLUIS = 52,
    IALLU = 53,

    // Data cache.
    IVAC = 54,
    ISW = 55,
    CSW = 56,
    CISW = 57,
    ZVA = 58,
    CVAC = 59,
    CVAU = 60,
    CIVAC = 61,
    CVAP = 62,

    // Instruction/data synchronization barriers.
    SY = 63,
    ST = 64,
    LD = 65,
    ISH = 66,
    ISHST = 67,
    ISHLD = 68,
    NSH = 69,
    NSHST = 70,
    NSHLD = 71,
    OSH = 72,
    OSHST = 73,
    OSHLD = 74,

    // Immediate-form system registers.
    SPSEL = 75,
    DAIFSET = 76,
    DAIFCLR = 77,
    UAO = 78,
    PAN = 79,
    DIT = 80,

    // Translation table maintenance.
    VMALLE1IS = 81,
    VAE1IS = 82,
    ASIDE1IS = 83,
    VAAE1IS = 84,
    VALE1IS = 85,
    VAALE1IS = 86,
    VMALLE1 = 87,
    VAE1 = 88,
    ASIDE1 = 89,
    VAAE1 = 90,
    VALE1 = 91,
    VAALE1 = 92,
    IPAS2E1IS = 93,
    IPAS2LE1IS = 94,
    ALLE2IS = 95,
    VAE2IS = 96,
    ALLE1IS = 97,
    VALE2IS = 98,
    VMALLS12E1IS = 99,
    IPAS2E1 = 100,
    IPAS2LE1 = 101,
    ALLE2 = 102,
    VAE2 = 103,
    ALLE1 = 104,
    VALE2 = 105,
    VMALLS12E1 = 106,
    ALLE3IS = 107,
    VAE3IS = 108,
    VALE3IS = 109,
    ALLE3 = 110,
    VAE3 = 111,
    VALE3 = 112,
    VMALLE1OS = 113,
    VAE1OS = 114,
    ASIDE1OS = 115,
    VAAE1OS = 116,
    VALE1OS = 117,
    VAALE1OS = 118,
    RVAE1IS = 119,
    RVAAE1IS = 120,
    RVALE1IS = 121,
    RVAALE1IS = 122,
    RVAE1OS = 123,
    RVAAE1OS = 124,
    RVALE1OS = 125,
    RVAALE1OS = 126,
    RVAE1 = 127,
    RVAAE1 = 128,
    RVALE1 = 129,
    RVAALE1 = 130,
    RIPAS2E1IS = 131,
    RIPAS2LE1IS = 132,
    ALLE2OS = 133,
    VAE2OS = 134,
    ALLE1OS = 135,
    VALE2OS = 136,
    VMALLS12E1OS = 137,
    RVAE2IS = 138,
    RVALE2IS = 139,
    IPAS2E1OS = 140,
    RIPAS2E1 = 141,
    RIPAS2E1OS = 142,
    IPAS2LE1OS = 143,
    RIPAS2LE1 = 144,
    RIPAS2LE1OS = 145,
    RVAE2OS = 146,
    RVALE2OS = 147,
    RVAE2 = 148,
    RVALE2 = 149,
    ALLE3OS = 150,
    VAE3OS = 151,
    VALE3OS = 152,
    RVAE3IS = 153,
    RVALE3IS = 154,
    RVAE3OS = 155,
    RVALE3OS = 156,
    RVAE3 = 157,
    RVALE3 = 158,
}

impl Symbol {
    /// Alias for [`Symbol::CS`].
    pub const HS: Symbol = Symbol::CS;
    /// Alias for [`Symbol::CC`].
    pub const LO: Symbol = Symbol::CC;

    /// Encoded value of an operation-selector symbol, deposited by the
    /// literal-list command. Symbols outside the operation sets have no
    /// encoded value.
    pub(crate) fn value(self) -> u16 {
        use Symbol::*;
        match self {
            S1E1R => 0b00001111000000,
            S1E1W => 0b00001111000001,
            S1E0R => 0b00001111000010,
            S1E0W => 0b00001111000011,
            S1E2R => 0b10001111000000,
            S1E2W => 0b10001111000001,
            S12E1R => 0b10001111000100,
            S12E1W => 0b10001111000101,
            S12E0R => 0b10001111000110,
            S12E0W => 0b10001111000111,
            S1E3R => 0b11001111000000,
            S1E3W => 0b11001111000001,
            S1E1RP => 0b00001111001000,
            S1E1WP => 0b00001111001001,
            IALLUIS => 0b00001110001000,
            IALLU => 0b00001110101000,
            IVAC => 0b00001110110001,
            ISW => 0b00001110110010,
            CSW => 0b00001111010010,
            CISW => 0b00001111110010,
            ZVA => 0b01101110100001,
            CVAC => 0b01101111010001,
            CVAU => 0b01101111011001,
            CIVAC => 0b01101111110001,
            CVAP => 0b01101111100001,
            SY => 0b1111,
            ST => 0b1110,
            LD => 0b1101,
            ISH => 0b1011,
            ISHST => 0b1010,
            ISHLD => 0b1001,
            NSH => 0b0111,
            NSHST => 0b0110,
            NSHLD => 0b0101,
            OSH => 0b0011,
            OSHST => 0b0010,
            OSHLD => 0b0001,
            SPSEL => 0b00001000000101,
            DAIFSET => 0b01101000000110,
            DAIFCLR => 0b01101000000111,
            UAO => 0b00001000000011,
            PAN => 0b00001000000100,
            DIT => 0b01101000000010,
            VMALLE1IS => 0b00010000011000,
            VAE1IS => 0b00010000011001,
            ASIDE1IS => 0b00010000011010,
            VAAE1IS => 0b00010000011011,
            VALE1IS => 0b00010000011101,
            VAALE1IS => 0b00010000011111,
            VMALLE1 => 0b00010000111000,
            VAE1 => 0b00010000111001,
            ASIDE1 => 0b00010000111010,
            VAAE1 => 0b00010000111011,
            VALE1 => 0b00010000111101,
            VAALE1 => 0b00010000111111,
            IPAS2E1IS => 0b10010000000001,
            IPAS2LE1IS => 0b10010000000101,
            ALLE2IS => 0b10010000011000,
            VAE2IS => 0b10010000011001,
            ALLE1IS => 0b10010000011100,
            VALE2IS => 0b10010000011101,
            VMALLS12E1IS => 0b10010000011110,
            IPAS2E1 => 0b10010000100001,
            IPAS2LE1 => 0b10010000100101,
            ALLE2 => 0b10010000111000,
            VAE2 => 0b10010000111001,
            ALLE1 => 0b10010000111100,
            VALE2 => 0b10010000111101,
            VMALLS12E1 => 0b10010000111110,
            ALLE3IS => 0b11010000011000,
            VAE3IS => 0b11010000011001,
            VALE3IS => 0b11010000011101,
            ALLE3 => 0b11010000111000,
            VAE3 => 0b11010000111001,
            VALE3 => 0b11010000111101,
            VMALLE1OS => 0b00010000001000,
            VAE1OS => 0b00010000001001,
            ASIDE1OS => 0b00010000001010,
            VAAE1OS => 0b00010000001011,
            VALE1OS => 0b00010000001101,
            VAALE1OS => 0b00010000001111,
            RVAE1IS => 0b00010000010001,
            RVAAE1IS => 0b00010000010011,
            RVALE1IS => 0b00010000010101,
            RVAALE1IS => 0b00010000010111,
            RVAE1OS => 0b00010000101001,
            RVAAE1OS => 0b00010000101011,
            RVALE1OS => 0b00010000101101,
            RVAALE1OS => 0b00010000101111,
            RVAE1 => 0b00010000110001,
            RVAAE1 => 0b00010000110011,
            RVALE1 => 0b00010000110101,
            RVAALE1 => 0b00010000110111,
            RIPAS2E1IS => 0b10010000000010,
            RIPAS2LE1IS => 0b10010000000110,
            ALLE2OS => 0b10010000001000,
            VAE2OS => 0b10010000001001,
            ALLE1OS => 0b10010000001100,
            VALE2OS => 0b10010000001101,
            VMALLS12E1OS => 0b10010000001110,
            RVAE2IS => 0b10010000010001,
            RVALE2IS => 0b10010000010101,
            IPAS2E1OS => 0b10010000100000,
            RIPAS2E1 => 0b10010000100010,
            RIPAS2E1OS => 0b10010000100011,
            IPAS2LE1OS => 0b10010000100100,
            RIPAS2LE1 => 0b10010000100110,
            RIPAS2LE1OS => 0b10010000100111,
            RVAE2OS => 0b10010000101001,
            RVALE2OS => 0b10010000101101,
            RVAE2 => 0b10010000110001,
            RVALE2 => 0b10010000110101,
            ALLE3OS => 0b11010000001000,
            VAE3OS => 0b11010000001001,
            VALE3OS => 0b11010000001101,
            RVAE3IS => 0b11010000010001,
            RVALE3IS => 0b11010000010101,
            RVAE3OS => 0b11010000101001,
            RVALE3OS => 0b11010000101101,
            RVAE3 => 0b11010000110001,
            RVALE3 => 0b11010000110101,
            _ => 0,
        }
    }
}

/// Address translation operations.
pub const ATOPS: &[Symbol] = {
    use Symbol::*;
    &[
        S1E1R, S1E1W, S1E0R, S1E0W, S1E2R, S1E2W, S12E1R, S12E1W, S12E0R, S12E0W, S1E3R,
        S1E3W, S1E1RP, S1E1WP,
    ]
};

/// Instruction cache operations.
pub const ICOPS: &[Symbol] = &[Symbol::IALLUIS, Symbol::IALLU];

/// Data cache operations.
pub const DCOPS: &[Symbol] = {
    use Symbol::*;
    &[IVAC, ISW, CSW, CISW, ZVA, CVAC, CVAU, CIVAC, CVAP]
};

/// Instruction/data synchronization barrier operations.
pub const BARRIEROPS: &[Symbol] = {
    use Symbol::*;
    &[SY, ST, LD, ISH, ISHST, ISHLD, NSH, NSHST, NSHLD, OSH, OSHST, OSHLD]
};

/// Immediate-form system registers.
pub const MSRIMMOPS: &[Symbol] = {
    use Symbol::*;
    &[SPSEL, DAIFSET, DAIFCLR, UAO, PAN, DIT]
};

/// Translation table maintenance operations.
pub const TLBIOPS: &[Symbol] = {
    use Symbol::*;
    &[
        VMALLE1IS,
        VAE1IS,
        ASIDE1IS,
        VAAE1IS,
        VALE1IS,
        VAALE1IS,
        VMALLE1,
        VAE1,
        ASIDE1,
        VAAE1,
        VALE1,
        VAALE1,
        IPAS2E1IS,
        IPAS2LE1IS,
        ALLE2IS,
        VAE2IS,
        ALLE1IS,
        VALE2IS,
        VMALLS12E1IS,
        IPAS2E1,
        IPAS2LE1,
        ALLE2,
        VAE2,
        ALLE1,
        VALE2,
        VMALLS12E1,
        ALLE3IS,
        VAE3IS,
        VALE3IS,
        ALLE3,
        VAE3,
        VALE3,
        VMALLE1OS,
        VAE1OS,
        ASIDE1OS,
        VAAE1OS,
        VALE1OS,
        VAALE1OS,
        RVAE1IS,
        RVAAE1IS,
        RVALE1IS,
        RVAALE1IS,
        RVAE1OS,
        RVAAE1OS,
        RVALE1OS,
        RVAALE1OS,
        RVAE1,
        RVAAE1,
        RVALE1,
        RVAALE1,
        RIPAS2E1IS,
        RIPAS2LE1IS,
        ALLE2OS,
        VAE2OS,
        ALLE1OS,
        VALE2OS,
        VMALLS12E1OS,
        RVAE2IS,
        RVALE2IS,
        IPAS2E1OS,
        RIPAS2E1,
        RIPAS2E1OS,
        IPAS2LE1OS,
        RIPAS2LE1,
        RIPAS2LE1OS,
        RVAE2OS,
        RVALE2OS,
        RVAE2,
        RVALE2,
        ALLE3OS,
        VAE3OS,
        VALE3OS,
        RVAE3IS,
        RVALE3IS,
        RVAE3OS,
        RVALE3OS,
        RVAE3,
        RVALE3,
    ]
};

//! Register model: element sizes, register families, and the packed
//! [`RegType`] byte every size/family/lane-count query derives from.

/// Element size of a register or of a vector lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Size {
    /// 8-bit elements.
    Byte = 1,
    /// 16-bit elements.
    Word = 2,
    /// 32-bit elements.
    Dword = 3,
    /// 64-bit elements.
    Qword = 4,
    /// 128-bit elements.
    Oword = 5,
}

/// Register family discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RegFamily {
    /// W and X registers (except SP).
    Int = 1,
    /// Stack-pointer registers.
    Sp = 2,
    /// Scalar SIMD registers.
    Scalar = 3,
    /// 32-bit vector registers.
    Vec32 = 4,
    /// 64-bit vector registers.
    Vec64 = 5,
    /// 128-bit vector registers.
    Vec128 = 6,
}

/// Packed register type: element size in the low nibble, family in the high
/// nibble.
///
/// The byte is opaque; all size/family/lane-count queries go through the
/// accessors, and the same byte is what the matcher predicates in the
/// encoding tables compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegType(u8);

impl RegType {
    /// 32-bit integer register.
    pub const W: RegType = RegType::new(Size::Dword, RegFamily::Int);
    /// 64-bit integer register.
    pub const X: RegType = RegType::new(Size::Qword, RegFamily::Int);
    /// 32-bit stack pointer register.
    pub const WSP: RegType = RegType::new(Size::Dword, RegFamily::Sp);
    /// 64-bit stack pointer register.
    pub const XSP: RegType = RegType::new(Size::Qword, RegFamily::Sp);
    /// 8-bit scalar SIMD register.
    pub const B: RegType = RegType::new(Size::Byte, RegFamily::Scalar);
    /// 16-bit scalar SIMD register.
    pub const H: RegType = RegType::new(Size::Word, RegFamily::Scalar);
    /// 32-bit scalar SIMD register.
    pub const S: RegType = RegType::new(Size::Dword, RegFamily::Scalar);
    /// 64-bit scalar SIMD register.
    pub const D: RegType = RegType::new(Size::Qword, RegFamily::Scalar);
    /// 128-bit scalar SIMD register.
    pub const Q: RegType = RegType::new(Size::Oword, RegFamily::Scalar);
    /// Vector of 4 byte lanes.
    pub const V4B: RegType = RegType::new(Size::Byte, RegFamily::Vec32);
    /// Vector of 8 byte lanes.
    pub const V8B: RegType = RegType::new(Size::Byte, RegFamily::Vec64);
    /// Vector of 16 byte lanes.
    pub const V16B: RegType = RegType::new(Size::Byte, RegFamily::Vec128);
    /// Vector of 2 halfword lanes.
    pub const V2H: RegType = RegType::new(Size::Word, RegFamily::Vec32);
    /// Vector of 4 halfword lanes.
    pub const V4H: RegType = RegType::new(Size::Word, RegFamily::Vec64);
    /// Vector of 8 halfword lanes.
    pub const V8H: RegType = RegType::new(Size::Word, RegFamily::Vec128);
    /// Vector of 2 word lanes.
    pub const V2S: RegType = RegType::new(Size::Dword, RegFamily::Vec64);
    /// Vector of 4 word lanes.
    pub const V4S: RegType = RegType::new(Size::Dword, RegFamily::Vec128);
    /// Vector of 1 doubleword lane.
    pub const V1D: RegType = RegType::new(Size::Qword, RegFamily::Vec64);
    /// Vector of 2 doubleword lanes.
    pub const V2D: RegType = RegType::new(Size::Qword, RegFamily::Vec128);
    /// Vector of 1 quadword lane.
    pub const V1O: RegType = RegType::new(Size::Oword, RegFamily::Vec128);

    const fn new(elem: Size, family: RegFamily) -> Self {
        RegType(elem as u8 | (family as u8) << 4)
    }

    /// Family encoded in the high nibble.
    pub const fn family(self) -> RegFamily {
        match self.0 >> 4 {
            1 => RegFamily::Int,
            2 => RegFamily::Sp,
            3 => RegFamily::Scalar,
            4 => RegFamily::Vec32,
            5 => RegFamily::Vec64,
            _ => RegFamily::Vec128,
        }
    }

    /// Element size encoded in the low nibble.
    pub const fn elem_size(self) -> Size {
        match self.0 & 0xF {
            1 => Size::Byte,
            2 => Size::Word,
            3 => Size::Dword,
            4 => Size::Qword,
            _ => Size::Oword,
        }
    }

    /// Element size in bytes.
    pub const fn elem_bytes(self) -> u8 {
        1u8 << (self.elem_size() as u8 - Size::Byte as u8)
    }

    /// Total register width in bytes.
    pub const fn bytes(self) -> u8 {
        match self.family() {
            RegFamily::Vec32 => 4,
            RegFamily::Vec64 => 8,
            RegFamily::Vec128 => 16,
            _ => self.elem_bytes(),
        }
    }

    /// Lane count for vector types, zero otherwise.
    pub const fn lanes(self) -> u8 {
        match self.family() {
            RegFamily::Vec32 => 4 / self.elem_bytes(),
            RegFamily::Vec64 => 8 / self.elem_bytes(),
            RegFamily::Vec128 => 16 / self.elem_bytes(),
            _ => 0,
        }
    }

    pub(crate) const fn elem_size_raw(self) -> u8 {
        self.0 & 0xF
    }
}

/// A scalar or vector register argument. Vector registers may carry an
/// element specifier.
///
/// The element index is stored bitwise-complemented so that zero uniquely
/// means "unset" while every real index (including zero) round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reg {
    /// Register number, 0 to 31.
    pub id: u8,
    /// Packed element size, family, and lane count.
    pub ty: RegType,
    /// Bitwise complement of the element index; zero indicates unset.
    pub elem_inv: u8,
}

/// 32-bit zero register.
pub const WZR: Reg = Reg::of(31, RegType::W);
/// 64-bit zero register.
pub const XZR: Reg = Reg::of(31, RegType::X);
/// 32-bit stack pointer register.
pub const WSP: Reg = Reg::of(31, RegType::WSP);
/// 64-bit stack pointer register.
pub const XSP: Reg = Reg::of(31, RegType::XSP);

impl Reg {
    const fn of(id: u8, ty: RegType) -> Self {
        Reg {
            id,
            ty,
            elem_inv: 0,
        }
    }

    /// Select a vector element, as in `V3.S[1]`.
    pub const fn i(self, idx: u8) -> Reg {
        Reg {
            id: self.id,
            ty: self.ty,
            elem_inv: !idx,
        }
    }

    /// Start a register list of `len` sequential registers at this register.
    pub const fn list(self, len: u8) -> RegList {
        RegList { first: self, len }
    }

    /// True if an element index is set.
    pub const fn has_elem(self) -> bool {
        self.elem_inv != 0
    }

    /// The element index. Only meaningful if [`Reg::has_elem`] returns true.
    pub const fn elem(self) -> u8 {
        !self.elem_inv
    }

    /// Register family.
    pub const fn family(self) -> RegFamily {
        self.ty.family()
    }

    /// Element size.
    pub const fn elem_size(self) -> Size {
        self.ty.elem_size()
    }

    /// Lane count for vector registers, zero otherwise.
    pub const fn lanes(self) -> u8 {
        self.ty.lanes()
    }

    /// True for the three vector families.
    pub const fn is_vec(self) -> bool {
        matches!(
            self.family(),
            RegFamily::Vec32 | RegFamily::Vec64 | RegFamily::Vec128
        )
    }
}

/// A register list argument with sequentially numbered registers
/// (modulo 32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegList {
    /// First register of the list.
    pub first: Reg,
    /// Number of registers, 1 to 4.
    pub len: u8,
}

impl RegList {
    /// Select the same vector element on every register of the list.
    pub const fn i(self, idx: u8) -> RegList {
        RegList {
            first: self.first.i(idx),
            len: self.len,
        }
    }
}

/// 32-bit integer register `id` (0 to 31; 31 is WZR).
pub const fn w(id: u8) -> Reg {
    Reg::of(id, RegType::W)
}

/// 64-bit integer register `id` (0 to 31; 31 is XZR).
pub const fn x(id: u8) -> Reg {
    Reg::of(id, RegType::X)
}

/// 8-bit scalar SIMD register `id`.
pub const fn scalar_b(id: u8) -> Reg {
    Reg::of(id, RegType::B)
}

/// 16-bit scalar SIMD register `id`.
pub const fn scalar_h(id: u8) -> Reg {
    Reg::of(id, RegType::H)
}

/// 32-bit scalar SIMD register `id`.
pub const fn scalar_s(id: u8) -> Reg {
    Reg::of(id, RegType::S)
}

/// 64-bit scalar SIMD register `id`.
pub const fn scalar_d(id: u8) -> Reg {
    Reg::of(id, RegType::D)
}

/// 128-bit scalar SIMD register `id`.
pub const fn scalar_q(id: u8) -> Reg {
    Reg::of(id, RegType::Q)
}

/// Vector register `id` as 4 byte lanes.
pub const fn vec4b(id: u8) -> Reg {
    Reg::of(id, RegType::V4B)
}

/// Vector register `id` as 8 byte lanes.
pub const fn vec8b(id: u8) -> Reg {
    Reg::of(id, RegType::V8B)
}

/// Vector register `id` as 16 byte lanes.
pub const fn vec16b(id: u8) -> Reg {
    Reg::of(id, RegType::V16B)
}

/// Vector register `id` as 2 halfword lanes.
pub const fn vec2h(id: u8) -> Reg {
    Reg::of(id, RegType::V2H)
}

/// Vector register `id` as 4 halfword lanes.
pub const fn vec4h(id: u8) -> Reg {
    Reg::of(id, RegType::V4H)
}

/// Vector register `id` as 8 halfword lanes.
pub const fn vec8h(id: u8) -> Reg {
    Reg::of(id, RegType::V8H)
}

/// Vector register `id` as 2 word lanes.
pub const fn vec2s(id: u8) -> Reg {
    Reg::of(id, RegType::V2S)
}

/// Vector register `id` as 4 word lanes.
pub const fn vec4s(id: u8) -> Reg {
    Reg::of(id, RegType::V4S)
}

/// Vector register `id` as a single doubleword lane.
pub const fn vec1d(id: u8) -> Reg {
    Reg::of(id, RegType::V1D)
}

/// Vector register `id` as 2 doubleword lanes.
pub const fn vec2d(id: u8) -> Reg {
    Reg::of(id, RegType::V2D)
}

/// Vector register `id` as a single quadword lane.
pub const fn vec1o(id: u8) -> Reg {
    Reg::of(id, RegType::V1O)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_type_queries() {
        assert_eq!(RegType::W.family(), RegFamily::Int);
        assert_eq!(RegType::XSP.family(), RegFamily::Sp);
        assert_eq!(RegType::Q.elem_size(), Size::Oword);
        assert_eq!(RegType::V16B.lanes(), 16);
        assert_eq!(RegType::V2H.lanes(), 2);
        assert_eq!(RegType::V1D.bytes(), 8);
        assert_eq!(RegType::V2D.bytes(), 16);
        assert_eq!(RegType::X.bytes(), 8);
        assert_eq!(RegType::W.lanes(), 0);
    }

    #[test]
    fn element_index_round_trips() {
        // 255 is unrepresentable by the complement scheme; it is the stored
        // "unset" sentinel.
        for idx in 0..u8::MAX {
            let reg = vec16b(3).i(idx);
            assert!(reg.has_elem());
            assert_eq!(reg.elem(), idx);
        }
        assert!(!vec16b(3).has_elem());
    }
}

//! Parameter value types
//!
//! Every parameter occupies one 32-bit slot in the persisted image. The type
//! tag travels separately, so values are modelled as a tagged enum instead
//! of reinterpreting the slot in place.

/// Parameter type tag, as stored in the image's type region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParamType {
    /// 32-bit signed integer
    Int32 = 0,
    /// 32-bit IEEE-754 float
    Float = 1,
}

impl ParamType {
    /// Tag byte written to the image
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a tag byte read from the image
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ParamType::Int32),
            1 => Some(ParamType::Float),
            _ => None,
        }
    }
}

/// Parameter value
///
/// Equality compares the raw 32-bit pattern, so `Float(0.0) != Float(-0.0)`
/// and a NaN equals an identical NaN. This is what persistence round-trips
/// preserve and what `set` uses to decide whether a value changed.
#[derive(Debug, Clone, Copy)]
pub enum ParamValue {
    /// Integer value
    Int32(i32),
    /// Float value
    Float(f32),
}

impl ParamValue {
    /// Raw 32-bit slot representation (for image storage)
    pub fn to_bits(self) -> u32 {
        match self {
            ParamValue::Int32(v) => v as u32,
            ParamValue::Float(v) => v.to_bits(),
        }
    }

    /// Rebuild a value from its slot and type tag
    pub fn from_bits(bits: u32, param_type: ParamType) -> Self {
        match param_type {
            ParamType::Int32 => ParamValue::Int32(bits as i32),
            ParamType::Float => ParamValue::Float(f32::from_bits(bits)),
        }
    }

    /// Type tag of this value
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Int32(_) => ParamType::Int32,
            ParamValue::Float(_) => ParamType::Float,
        }
    }

    /// Integer payload, if this is an integer parameter
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int32(v) => Some(*v),
            ParamValue::Float(_) => None,
        }
    }

    /// Float payload, if this is a float parameter
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int32(_) => None,
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        self.param_type() == other.param_type() && self.to_bits() == other.to_bits()
    }
}

impl Eq for ParamValue {}

//! In-memory parameter table
//!
//! Fixed-size, id-indexed storage for every parameter's name and value.
//! The table is pure data: persistence and change notification are layered
//! on top by the firmware's `ParameterStore`.

use super::error::ParameterError;
use super::id::{ParamId, PARAM_COUNT, PARAM_DEFAULTS, PARAM_NAME_LEN};
use super::value::{ParamType, ParamValue};

/// Zero-padded fixed-width parameter name
pub type ParamName = [u8; PARAM_NAME_LEN];

/// Parameter table
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTable {
    values: [ParamValue; PARAM_COUNT],
    names: [ParamName; PARAM_COUNT],
}

impl ParamTable {
    /// Create a table populated with compiled-in defaults
    pub fn new() -> Self {
        let mut table = Self {
            values: [ParamValue::Int32(0); PARAM_COUNT],
            names: [[0; PARAM_NAME_LEN]; PARAM_COUNT],
        };
        table.reset_to_defaults();
        table
    }

    /// Build a table from decoded image regions
    pub(crate) fn from_parts(
        values: [ParamValue; PARAM_COUNT],
        names: [ParamName; PARAM_COUNT],
    ) -> Self {
        Self { values, names }
    }

    /// Repopulate every parameter with its compiled-in name and value
    pub fn reset_to_defaults(&mut self) {
        for entry in PARAM_DEFAULTS.iter() {
            let index = entry.id.index();
            self.values[index] = entry.value;
            self.names[index] = encode_name(entry.name);
        }
    }

    /// Current value
    pub fn get(&self, id: ParamId) -> ParamValue {
        self.values[id.index()]
    }

    /// Current value by raw index, `None` if out of range
    pub fn get_by_index(&self, index: usize) -> Option<ParamValue> {
        self.values.get(index).copied()
    }

    /// Current value as float
    ///
    /// Integer parameters are converted numerically.
    pub fn get_float(&self, id: ParamId) -> f32 {
        match self.get(id) {
            ParamValue::Float(v) => v,
            ParamValue::Int32(v) => v as f32,
        }
    }

    /// Current value as integer
    ///
    /// Float parameters are truncated toward zero.
    pub fn get_int(&self, id: ParamId) -> i32 {
        match self.get(id) {
            ParamValue::Int32(v) => v,
            ParamValue::Float(v) => v as i32,
        }
    }

    /// Stored type tag
    pub fn param_type(&self, id: ParamId) -> ParamType {
        self.get(id).param_type()
    }

    /// Store `value`, returning whether it differed from the current value
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::TypeMismatch` if `value`'s type differs from
    /// the stored type.
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<bool, ParameterError> {
        let slot = &mut self.values[id.index()];
        if slot.param_type() != value.param_type() {
            return Err(ParameterError::TypeMismatch);
        }
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    /// Find a parameter by name
    ///
    /// Compares byte-by-byte against each stored name, stopping at the first
    /// zero byte of the stored name. At most [`PARAM_NAME_LEN`] bytes are
    /// compared, so a longer query matches a full-width stored name on its
    /// first [`PARAM_NAME_LEN`] bytes. Case-sensitive.
    pub fn lookup(&self, name: &str) -> Option<ParamId> {
        let query = name.as_bytes();
        self.names
            .iter()
            .position(|stored| names_match(stored, query))
            .and_then(ParamId::from_index)
    }

    /// Stored name as a string slice (without padding)
    pub fn name(&self, id: ParamId) -> &str {
        let raw = &self.names[id.index()];
        let len = raw.iter().position(|&b| b == 0).unwrap_or(PARAM_NAME_LEN);
        core::str::from_utf8(&raw[..len]).unwrap_or("")
    }

    /// Stored name bytes including padding
    pub fn raw_name(&self, id: ParamId) -> &ParamName {
        &self.names[id.index()]
    }

    /// All values in id order
    pub fn values(&self) -> &[ParamValue; PARAM_COUNT] {
        &self.values
    }

    /// All names in id order
    pub fn names(&self) -> &[ParamName; PARAM_COUNT] {
        &self.names
    }

    /// Iterate over `(id, value)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, ParamValue)> + '_ {
        ParamId::ALL.iter().map(move |&id| (id, self.get(id)))
    }
}

impl Default for ParamTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-pad a compiled-in name into a fixed-width buffer
fn encode_name(name: &str) -> ParamName {
    let mut buf = [0u8; PARAM_NAME_LEN];
    for (dst, src) in buf.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    buf
}

fn names_match(stored: &ParamName, query: &[u8]) -> bool {
    for (i, &stored_byte) in stored.iter().enumerate() {
        let query_byte = query.get(i).copied().unwrap_or(0);
        if query_byte != stored_byte {
            return false;
        }
        if stored_byte == 0 {
            break;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_has_defaults() {
        let table = ParamTable::new();
        for entry in PARAM_DEFAULTS.iter() {
            assert_eq!(table.get(entry.id), entry.value);
            assert_eq!(table.name(entry.id), entry.name);
        }
    }

    #[test]
    fn test_set_get_round_trip_every_id() {
        let mut table = ParamTable::new();
        for (i, &id) in ParamId::ALL.iter().enumerate() {
            let value = match table.param_type(id) {
                ParamType::Int32 => ParamValue::Int32(1000 + i as i32),
                ParamType::Float => ParamValue::Float(0.25 + i as f32),
            };
            assert_eq!(table.set(id, value), Ok(true));
            assert_eq!(table.get(id), value);
        }
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut table = ParamTable::new();
        assert_eq!(table.set(ParamId::SysId, ParamValue::Int32(1)), Ok(false));
        assert_eq!(
            table.set(ParamId::AccelScale, ParamValue::Float(1.0)),
            Ok(false)
        );
    }

    #[test]
    fn test_set_type_mismatch() {
        let mut table = ParamTable::new();
        assert_eq!(
            table.set(ParamId::SysId, ParamValue::Float(2.0)),
            Err(ParameterError::TypeMismatch)
        );
        assert_eq!(table.get(ParamId::SysId), ParamValue::Int32(1));
    }

    #[test]
    fn test_lookup_every_name() {
        let table = ParamTable::new();
        for entry in PARAM_DEFAULTS.iter() {
            assert_eq!(table.lookup(entry.name), Some(entry.id));
        }
    }

    #[test]
    fn test_lookup_rejects_prefixes_and_extensions() {
        let table = ParamTable::new();
        assert_eq!(table.lookup("SYS"), None);
        assert_eq!(table.lookup("SYS_ID_"), None);
        assert_eq!(table.lookup("ACC_X_TEMP"), None);
        assert_eq!(table.lookup("STRM_IMUX"), None);
        assert_eq!(table.lookup("sys_id"), None);
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("NOT_A_PARAM"), None);
    }

    #[test]
    fn test_typed_getters_convert() {
        let table = ParamTable::new();
        assert_eq!(table.get_float(ParamId::StreamImuRate), 100.0);
        assert_eq!(table.get_int(ParamId::ArmThreshold), 0);
        assert_eq!(table.get_float(ParamId::AccelScale), 1.0);
    }

    #[test]
    fn test_get_by_index_bounds() {
        let table = ParamTable::new();
        assert_eq!(table.get_by_index(0), Some(ParamValue::Int32(1)));
        assert_eq!(table.get_by_index(PARAM_COUNT), None);
    }

    #[test]
    fn test_reset_to_defaults_is_idempotent() {
        let mut table = ParamTable::new();
        table
            .set(ParamId::GyroXBias, ParamValue::Float(0.02))
            .unwrap();
        table.reset_to_defaults();
        let once = table.clone();
        table.reset_to_defaults();
        assert_eq!(table, once);
        assert_eq!(table, ParamTable::new());
    }
}

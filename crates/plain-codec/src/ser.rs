//! Serde adapter: build a [`Value`] from any `Serialize` type.
//!
//! This is the "convert to plain structure" step that sits in front of the
//! encoder. Host shapes outside the closed value set are rejected with a type
//! error instead of being coerced:
//!
//! - map keys that are not strings (`HashMap<u32, _>`, tuple keys, ...)
//! - integers that do not fit in `i64`
//! - NaN and infinite floats
//! - raw byte buffers
//!
//! Structs become mappings in declaration order. Enums use the external
//! tagging serde_json uses: `"Unit"`, `{"Newtype": v}`, `{"Tuple": [..]}`,
//! `{"Struct": {..}}`.

use serde::ser::{
    self, Impossible, Serialize, SerializeMap, SerializeSeq, SerializeStruct,
    SerializeStructVariant, SerializeTuple, SerializeTupleStruct, SerializeTupleVariant,
};

use crate::encoder::encode;
use crate::error::{CodecError, Result};
use crate::types::Value;

/// Convert a serializable value into a [`Value`].
///
/// # Example
/// ```
/// use plain_codec::{to_value, Value};
/// use std::collections::BTreeMap;
///
/// let sizes = vec!["S", "M"];
/// assert_eq!(
///     to_value(&sizes).unwrap(),
///     Value::Sequence(vec![Value::from("S"), Value::from("M")])
/// );
///
/// let mut by_id = BTreeMap::new();
/// by_id.insert(1u32, "S");
/// assert!(to_value(&by_id).is_err());
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Convert a serializable value straight to text; see [`encode`] for `indent`.
pub fn to_text<T: Serialize + ?Sized>(value: &T, indent: Option<usize>) -> Result<String> {
    encode(&to_value(value)?, indent)
}

fn check_float(v: f64) -> Result<Value> {
    if v.is_finite() {
        Ok(Value::Float(v))
    } else {
        Err(CodecError::unsupported(format!(
            "float {v} has no textual representation"
        )))
    }
}

fn tagged(variant: &'static str, value: Value) -> Value {
    Value::Mapping(vec![(variant.to_string(), value)])
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = CodecError;
    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = TupleVariantCollector;
    type SerializeMap = MapCollector;
    type SerializeStruct = MapCollector;
    type SerializeStructVariant = StructVariantCollector;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| CodecError::unsupported(format!("integer {v} is out of range")))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| CodecError::unsupported(format!("integer {v} is out of range")))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| CodecError::unsupported(format!("integer {v} is out of range")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        check_float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        check_float(v)
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value> {
        Err(CodecError::unsupported("byte buffers are not plain values"))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        Ok(tagged(variant, value.serialize(ValueSerializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCollector> {
        Ok(SeqCollector::new(len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector> {
        Ok(SeqCollector::new(Some(len)))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqCollector> {
        Ok(SeqCollector::new(Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantCollector> {
        Ok(TupleVariantCollector {
            variant,
            items: SeqCollector::new(Some(len)),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCollector> {
        Ok(MapCollector::new(len))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapCollector> {
        Ok(MapCollector::new(Some(len)))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructVariantCollector> {
        Ok(StructVariantCollector {
            variant,
            fields: MapCollector::new(Some(len)),
        })
    }
}

struct SeqCollector {
    items: Vec<Value>,
}

impl SeqCollector {
    fn new(len: Option<usize>) -> Self {
        Self {
            items: Vec::with_capacity(len.unwrap_or(0)),
        }
    }
}

impl SerializeSeq for SeqCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.items))
    }
}

impl SerializeTuple for SeqCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for SeqCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        SerializeSeq::end(self)
    }
}

struct TupleVariantCollector {
    variant: &'static str,
    items: SeqCollector,
}

impl SerializeTupleVariant for TupleVariantCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        SerializeSeq::serialize_element(&mut self.items, value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, SerializeSeq::end(self.items)?))
    }
}

/// Collects mapping entries in insertion order. Also used for structs.
struct MapCollector {
    pairs: Vec<(String, Value)>,
    next_key: Option<String>,
}

impl MapCollector {
    fn new(len: Option<usize>) -> Self {
        Self {
            pairs: Vec::with_capacity(len.unwrap_or(0)),
            next_key: None,
        }
    }
}

impl SerializeMap for MapCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.next_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self.next_key.take().ok_or_else(|| {
            CodecError::unsupported("serialize_value called before serialize_key")
        })?;
        self.pairs.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.pairs))
    }
}

impl SerializeStruct for MapCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.pairs
            .push((key.to_owned(), value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.pairs))
    }
}

struct StructVariantCollector {
    variant: &'static str,
    fields: MapCollector,
}

impl SerializeStructVariant for StructVariantCollector {
    type Ok = Value;
    type Error = CodecError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        SerializeStruct::serialize_field(&mut self.fields, key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, SerializeStruct::end(self.fields)?))
    }
}

/// Accepts only string-like keys: `&str`, `String`, `char`, unit variants.
struct KeySerializer;

fn key_must_be_string(found: &str) -> CodecError {
    CodecError::unsupported(format!("mapping keys must be strings, found {found}"))
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = CodecError;
    type SerializeSeq = Impossible<String, CodecError>;
    type SerializeTuple = Impossible<String, CodecError>;
    type SerializeTupleStruct = Impossible<String, CodecError>;
    type SerializeTupleVariant = Impossible<String, CodecError>;
    type SerializeMap = Impossible<String, CodecError>;
    type SerializeStruct = Impossible<String, CodecError>;
    type SerializeStructVariant = Impossible<String, CodecError>;

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String> {
        Err(key_must_be_string("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<String> {
        Err(key_must_be_string("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(key_must_be_string("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(key_must_be_string("float"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_string("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_string("null"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String> {
        Err(key_must_be_string("option"))
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_string("null"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_string("unit struct"))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        Err(key_must_be_string("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_string("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_string("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_string("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_string("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_string("mapping"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_string("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_string("enum variant"))
    }
}

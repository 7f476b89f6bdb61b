//! (De)serialize a [Color] as a color specification string
//!
//! Use with `#[serde(with = "crate::serde::color_spec")]`. Any form accepted by
//! [crate::color::resolve] is accepted; colors are written back as `R,G,B`.

use std::fmt;

use crate::models::Color;

struct ColorSpecVisitor;

impl<'a> serde::de::Visitor<'a> for ColorSpecVisitor {
    type Value = Color;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an R,G,B triple, a hex color or a color name")
    }

    fn visit_str<E>(self, spec: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        crate::color::resolve(spec).map_err(E::custom)
    }
}

pub fn serialize<S: serde::ser::Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{},{},{}", color.red, color.green, color.blue))
}

pub fn deserialize<'de, D>(de: D) -> Result<Color, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    de.deserialize_str(ColorSpecVisitor)
}

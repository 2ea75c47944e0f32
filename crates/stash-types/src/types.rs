use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural key identifying a shareable descriptor.
///
/// Equality and hashing are field-wise, so `("Stu", "dioXPS")` and
/// `("StudioX", "PS")` never collide the way concatenated string keys would.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DescriptorKey {
    /// Manufacturer, e.g. "Dell"
    pub make: String,
    /// Model line, e.g. "Studio XPS"
    pub model: String,
    /// Processor vendor, e.g. "Intel"
    pub processor: String,
}

impl DescriptorKey {
    /// Create a key from its three identity fields
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        processor: impl Into<String>,
    ) -> Self {
        Self { make: make.into(), model: model.into(), processor: processor.into() }
    }
}

impl fmt::Display for DescriptorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.make, self.model, self.processor)
    }
}

/// Immutable shared descriptor.
///
/// Fields are private and only readable through accessors; once built a
/// descriptor never changes, which is what makes handing out one shared
/// instance to many records sound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descriptor {
    make: String,
    model: String,
    processor: String,
}

impl Descriptor {
    /// Build the descriptor identified by `key`
    #[must_use]
    pub fn from_key(key: &DescriptorKey) -> Self {
        Self {
            make: key.make.clone(),
            model: key.model.clone(),
            processor: key.processor.clone(),
        }
    }

    /// Manufacturer
    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Model line
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Processor vendor
    #[must_use]
    pub fn processor(&self) -> &str {
        &self.processor
    }

    /// The key this descriptor is shared under
    #[must_use]
    pub fn key(&self) -> DescriptorKey {
        DescriptorKey::new(&self.make, &self.model, &self.processor)
    }
}

impl From<&DescriptorKey> for Descriptor {
    fn from(key: &DescriptorKey) -> Self {
        Self::from_key(key)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.make, self.model, self.processor)
    }
}

/// A latitude/longitude pair in signed decimal degrees.
///
/// North and east are positive. Displayed with hemisphere letters, e.g.
/// `51.5171° N, 0.1062° W`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Degrees north of the equator (negative for south)
    pub latitude: f64,
    /// Degrees east of Greenwich (negative for west)
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates from signed decimal degrees
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let north_south = if self.latitude < 0.0 { 'S' } else { 'N' };
        let east_west = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}° {north_south}, {:.4}° {east_west}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_compare_field_wise() {
        let a = DescriptorKey::new("Stu", "dioXPS", "Intel");
        let b = DescriptorKey::new("StudioX", "PS", "Intel");
        assert_ne!(a, b);

        let mut set = HashSet::new();
        set.insert(a.clone());
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_descriptor_round_trips_its_key() {
        let key = DescriptorKey::new("HP", "Envy", "Intel");
        let descriptor = Descriptor::from(&key);

        assert_eq!(descriptor.make(), "HP");
        assert_eq!(descriptor.model(), "Envy");
        assert_eq!(descriptor.processor(), "Intel");
        assert_eq!(descriptor.key(), key);
        assert_eq!(descriptor.to_string(), "HP Envy (Intel)");
    }

    #[test]
    fn test_coordinates_display_hemispheres() {
        assert_eq!(Coordinates::new(52.37, 4.89).to_string(), "52.3700° N, 4.8900° E");
        assert_eq!(Coordinates::new(51.5171, -0.1062).to_string(), "51.5171° N, 0.1062° W");
        assert_eq!(Coordinates::new(-33.8688, 151.2093).to_string(), "33.8688° S, 151.2093° E");
    }

    #[test]
    fn test_descriptor_serializes_fields() {
        let descriptor = Descriptor::from_key(&DescriptorKey::new("Dell", "Studio XPS", "Intel"));
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["make"], "Dell");
        assert_eq!(json["model"], "Studio XPS");
        assert_eq!(json["processor"], "Intel");
    }
}

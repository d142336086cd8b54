//! Device and SubFamily - the records shown to the user.

/// Description used for devices that carry no `description` element.
pub const NO_DESCRIPTION: &str = "No description available";

/// A single device (part) of a sub-family.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    /// Device name, from the `Dname` attribute
    pub label: String,
    /// Text of the first `description` child, or [`NO_DESCRIPTION`]
    pub description: String,
}

impl Device {
    /// Creates a device with an explicit description.
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }

    /// Creates a device that has no description.
    pub fn without_description(label: impl Into<String>) -> Self {
        Self::new(label, NO_DESCRIPTION)
    }

    /// Returns true if the device carried its own description.
    pub fn has_description(&self) -> bool {
        self.description != NO_DESCRIPTION
    }
}

/// A sub-family and the devices it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubFamily {
    /// Sub-family name, from the `DsubFamily` attribute
    pub label: String,
    /// Devices in document order
    pub devices: Vec<Device>,
}

impl SubFamily {
    /// Creates a sub-family with no devices.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            devices: Vec::new(),
        }
    }

    /// Appends a device.
    pub fn push(&mut self, device: Device) {
        self.devices.push(device);
    }

    /// Returns the device labels in order.
    pub fn device_labels(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.label.as_str()).collect()
    }

    /// Returns the first device with the given label.
    pub fn find_device(&self, label: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.label == label)
    }
}

/// All sub-families of a document, flattened across families.
///
/// Order is family order first, then sub-family order within each family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SubFamilies(Vec<SubFamily>);

impl SubFamilies {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a sub-family.
    pub fn push(&mut self, sub_family: SubFamily) {
        self.0.push(sub_family);
    }

    /// Returns the number of sub-families.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no sub-families.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the sub-family at `index`.
    pub fn get(&self, index: usize) -> Option<&SubFamily> {
        self.0.get(index)
    }

    /// Iterates over the sub-families in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SubFamily> {
        self.0.iter()
    }

    /// Returns the sub-family labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.label.as_str()).collect()
    }

    /// Returns the first sub-family with the given label.
    pub fn find(&self, label: &str) -> Option<&SubFamily> {
        self.0.iter().find(|s| s.label == label)
    }

    /// Total number of devices across all sub-families.
    pub fn device_count(&self) -> usize {
        self.0.iter().map(|s| s.devices.len()).sum()
    }

    /// Returns the sub-families as a slice.
    pub fn as_slice(&self) -> &[SubFamily] {
        &self.0
    }
}

impl From<Vec<SubFamily>> for SubFamilies {
    fn from(sub_families: Vec<SubFamily>) -> Self {
        Self(sub_families)
    }
}

impl FromIterator<SubFamily> for SubFamilies {
    fn from_iter<I: IntoIterator<Item = SubFamily>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SubFamilies {
    type Item = SubFamily;
    type IntoIter = std::vec::IntoIter<SubFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SubFamilies {
    type Item = &'a SubFamily;
    type IntoIter = std::slice::Iter<'a, SubFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

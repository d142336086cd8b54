//! Device hierarchy extraction.
//!
//! Walks a parsed [`Document`] and collects every sub-family with its
//! devices. The expected shape is:
//!
//! ```text
//! <package>
//!   <devices>
//!     <family>
//!       <subFamily DsubFamily="...">
//!         <device Dname="...">
//!           <description>...</description>
//!         </device>
//!       </subFamily>
//!     </family>
//!   </devices>
//! </package>
//! ```
//!
//! All element and attribute names are case-sensitive. Only the first
//! `devices` element is used.

use crate::error::{Error, Result};
use crate::objects::{Device, SubFamilies, SubFamily, NO_DESCRIPTION};
use crate::tree::{Document, Element};

const PACKAGE: &str = "package";
const DEVICES: &str = "devices";
const FAMILY: &str = "family";
const SUB_FAMILY: &str = "subFamily";
const DEVICE: &str = "device";
const DESCRIPTION: &str = "description";
const ATTR_SUB_FAMILY: &str = "DsubFamily";
const ATTR_DEVICE_NAME: &str = "Dname";

/// Extracts all sub-families from a parsed `.pdsc` document.
///
/// Fails with [`Error::MissingPackageElement`], [`Error::MissingDevicesElement`]
/// or [`Error::MissingFamilyElement`] when the corresponding element is absent,
/// with [`Error::MissingAttribute`] when a sub-family or device has no label,
/// and with [`Error::NoSubFamiliesFound`] when no family has a sub-family.
/// On failure nothing is returned; there are no partial results.
pub fn extract(document: &Document) -> Result<SubFamilies> {
    let package = document
        .child(PACKAGE)
        .ok_or(Error::MissingPackageElement)?;
    let devices = package
        .first_child(DEVICES)
        .ok_or(Error::MissingDevicesElement)?;
    if !devices.has_children(FAMILY) {
        return Err(Error::MissingFamilyElement);
    }

    let mut sub_families = SubFamilies::new();
    for family in devices.children(FAMILY) {
        for sub_family in family.children(SUB_FAMILY) {
            sub_families.push(extract_sub_family(sub_family)?);
        }
    }

    if sub_families.is_empty() {
        return Err(Error::NoSubFamiliesFound);
    }
    Ok(sub_families)
}

fn extract_sub_family(element: &Element) -> Result<SubFamily> {
    let label = element
        .attr(ATTR_SUB_FAMILY)
        .ok_or(Error::MissingAttribute {
            element: SUB_FAMILY,
            attribute: ATTR_SUB_FAMILY,
        })?;

    let mut sub_family = SubFamily::new(label);
    for device in element.children(DEVICE) {
        sub_family.push(extract_device(device)?);
    }
    Ok(sub_family)
}

fn extract_device(element: &Element) -> Result<Device> {
    let label = element
        .attr(ATTR_DEVICE_NAME)
        .ok_or(Error::MissingAttribute {
            element: DEVICE,
            attribute: ATTR_DEVICE_NAME,
        })?;
    let description = element
        .first_child(DESCRIPTION)
        .map(|d| d.text())
        .unwrap_or(NO_DESCRIPTION);
    Ok(Device::new(label, description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_str;

    fn extract_str(xml: &str) -> Result<SubFamilies> {
        extract(&parse_str(xml).unwrap())
    }

    #[test]
    fn test_single_device() {
        let subs = extract_str(
            r#"<package>
  <devices>
    <family Dfamily="STM32F4">
      <subFamily DsubFamily="M4">
        <device Dname="STM32F4">
          <description>Cortex-M4 MCU</description>
        </device>
      </subFamily>
    </family>
  </devices>
</package>"#,
        )
        .unwrap();

        let expected: SubFamilies = vec![SubFamily {
            label: "M4".to_string(),
            devices: vec![Device::new("STM32F4", "Cortex-M4 MCU")],
        }]
        .into();
        assert_eq!(subs, expected);
    }

    #[test]
    fn test_missing_package() {
        let err = extract_str("<pack><devices><family/></devices></pack>").unwrap_err();
        assert!(matches!(err, Error::MissingPackageElement));

        let err = extract_str("<Package><devices/></Package>").unwrap_err();
        assert!(matches!(err, Error::MissingPackageElement));
    }

    #[test]
    fn test_missing_devices() {
        let err = extract_str("<package><vendor>ARM</vendor></package>").unwrap_err();
        assert!(matches!(err, Error::MissingDevicesElement));
    }

    #[test]
    fn test_missing_family() {
        let err = extract_str("<package><devices></devices></package>").unwrap_err();
        assert!(matches!(err, Error::MissingFamilyElement));

        let err = extract_str("<package><devices><Family/></devices></package>").unwrap_err();
        assert!(matches!(err, Error::MissingFamilyElement));
    }

    #[test]
    fn test_only_first_devices_element_is_used() {
        let err = extract_str(
            r#"<package>
  <devices/>
  <devices><family><subFamily DsubFamily="A"/></family></devices>
</package>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingFamilyElement));
    }

    #[test]
    fn test_childless_family_has_no_sub_families() {
        let err = extract_str("<package><devices><family></family></devices></package>")
            .unwrap_err();
        assert!(matches!(err, Error::NoSubFamiliesFound));

        let err = extract_str(
            "<package><devices><family/><family><device Dname=\"X\"/></family></devices></package>",
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoSubFamiliesFound));
    }

    #[test]
    fn test_order_is_preserved_across_families() {
        let subs = extract_str(
            r#"<package><devices>
  <family Dfamily="F1">
    <subFamily DsubFamily="A"/>
    <subFamily DsubFamily="B"/>
  </family>
  <family Dfamily="F0"/>
  <family Dfamily="F2">
    <subFamily DsubFamily="C"/>
  </family>
</devices></package>"#,
        )
        .unwrap();
        assert_eq!(subs.labels(), vec!["A", "B", "C"]);
        assert!(subs.iter().all(|s| s.devices.is_empty()));
    }

    #[test]
    fn test_description_fallback() {
        let subs = extract_str(
            r#"<package><devices><family>
  <subFamily DsubFamily="M0">
    <device Dname="NoDesc"><feature type="Core"/></device>
    <device Dname="WithDesc"><description>Foo</description></device>
    <device Dname="Empty"><description/></device>
    <device Dname="Two"><description>first</description><description>second</description></device>
  </subFamily>
</family></devices></package>"#,
        )
        .unwrap();
        let devices = &subs.get(0).unwrap().devices;
        assert_eq!(devices[0], Device::new("NoDesc", "No description available"));
        assert_eq!(devices[1], Device::new("WithDesc", "Foo"));
        assert_eq!(devices[2], Device::new("Empty", ""));
        assert_eq!(devices[3], Device::new("Two", "first"));
    }

    #[test]
    fn test_description_with_inline_markup() {
        let subs = extract_str(
            r#"<package><devices><family>
  <subFamily DsubFamily="M4">
    <device Dname="X">
      <description>Cortex-M4 <b>fast</b> MCU, a <![CDATA[b]]> c</description>
    </device>
  </subFamily>
</family></devices></package>"#,
        )
        .unwrap();
        assert_eq!(
            subs.get(0).unwrap().devices[0],
            Device::new("X", "Cortex-M4  MCU, a b c")
        );
    }

    #[test]
    fn test_missing_labels_are_rejected() {
        let err = extract_str(
            "<package><devices><family><subFamily><device Dname=\"X\"/></subFamily></family></devices></package>",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute {
                element: "subFamily",
                attribute: "DsubFamily"
            }
        ));

        let err = extract_str(
            "<package><devices><family><subFamily DsubFamily=\"A\"><device/></subFamily></family></devices></package>",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute {
                element: "device",
                attribute: "Dname"
            }
        ));
    }

    #[test]
    fn test_extract_is_repeatable() {
        let doc = parse_str(
            r#"<package><devices><family>
  <subFamily DsubFamily="M4"><device Dname="STM32F4"><description>Cortex-M4 MCU</description></device></subFamily>
</family></devices></package>"#,
        )
        .unwrap();
        let first = extract(&doc).unwrap();
        let second = extract(&doc).unwrap();
        assert_eq!(first, second);
    }
}

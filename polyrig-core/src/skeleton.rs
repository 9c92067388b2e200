//! Bone hierarchy that exported parts attach to

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named bone with an optional parent and a pivot in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub pivot: [f32; 3],
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locators: BTreeMap<String, [f32; 3]>,
}

impl Bone {
    pub fn new(name: &str, parent: Option<&str>, pivot: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            pivot,
            locators: BTreeMap::new(),
        }
    }

    pub fn with_locator(mut self, name: &str, position: [f32; 3]) -> Self {
        self.locators.insert(name.to_string(), position);
        self
    }
}

/// The standard humanoid rig: root, torso, head, arms, legs and their
/// overlay layers.
pub fn default_humanoid_bones() -> Vec<Bone> {
    vec![
        Bone::new("root", None, [0.0, 0.0, 0.0]),
        Bone::new("body", Some("waist"), [0.0, 24.0, 0.0]),
        Bone::new("waist", Some("root"), [0.0, 12.0, 0.0]),
        Bone::new("head", Some("body"), [0.0, 24.0, 0.0]),
        Bone::new("cape", Some("body"), [0.0, 24.0, 3.0]),
        Bone::new("hat", Some("head"), [0.0, 24.0, 0.0]),
        Bone::new("leftArm", Some("body"), [-5.0, 22.0, 0.0]),
        Bone::new("leftSleeve", Some("leftArm"), [-5.0, 22.0, 0.0]),
        Bone::new("leftItem", Some("leftArm"), [-6.0, 15.0, 1.0]),
        Bone::new("rightArm", Some("body"), [5.0, 22.0, 0.0]),
        Bone::new("rightSleeve", Some("rightArm"), [5.0, 22.0, 0.0]),
        Bone::new("rightItem", Some("rightArm"), [6.0, 15.0, 1.0])
            .with_locator("lead_hold", [-6.0, 15.0, 1.0]),
        Bone::new("leftLeg", Some("root"), [-1.9, 12.0, 0.0]),
        Bone::new("leftPants", Some("leftLeg"), [-1.9, 12.0, 0.0]),
        Bone::new("rightLeg", Some("root"), [1.9, 12.0, 0.0]),
        Bone::new("rightPants", Some("rightLeg"), [1.9, 12.0, 0.0]),
        Bone::new("jacket", Some("body"), [0.0, 24.0, 0.0]),
    ]
}

pub fn find_bone<'a>(bones: &'a [Bone], name: &str) -> Option<&'a Bone> {
    bones.iter().find(|bone| bone.name == name)
}

/// Names of bones whose parent is not in `bones`.
pub fn dangling_parents(bones: &[Bone]) -> Vec<&str> {
    bones
        .iter()
        .filter(|bone| {
            bone.parent
                .as_deref()
                .is_some_and(|parent| find_bone(bones, parent).is_none())
        })
        .map(|bone| bone.name.as_str())
        .collect()
}

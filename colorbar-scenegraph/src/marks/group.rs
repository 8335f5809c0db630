use crate::error::ColorbarSceneGraphError;
use crate::marks::mark::SceneMark;
use serde::{Deserialize, Serialize};

/// A translated container of marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    pub name: String,
    pub origin: [f32; 2],
    pub marks: Vec<SceneMark>,
    pub zindex: Option<i32>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>, origin: [f32; 2]) -> Self {
        Self {
            name: name.into(),
            origin,
            ..Default::default()
        }
    }

    pub fn push(&mut self, mark: impl Into<SceneMark>) {
        self.marks.push(mark.into());
    }

    pub fn with_mark(mut self, mark: impl Into<SceneMark>) -> Self {
        self.push(mark);
        self
    }

    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group.group_paths() {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    /// First direct child group with the given name
    pub fn find_group(&self, name: &str) -> Option<&SceneGroup> {
        self.marks.iter().find_map(|m| match m {
            SceneMark::Group(g) if g.name == name => Some(g),
            _ => None,
        })
    }

    /// First direct child mark of any kind with the given name
    pub fn find_mark(&self, name: &str) -> Option<&SceneMark> {
        self.marks.iter().find(|m| m.name() == name)
    }

    pub fn validate(&self) -> Result<(), ColorbarSceneGraphError> {
        self.marks.iter().try_for_each(|m| m.validate())
    }
}

impl Default for SceneGroup {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            origin: [0.0, 0.0],
            marks: vec![],
            zindex: None,
        }
    }
}

impl From<SceneGroup> for SceneMark {
    fn from(mark: SceneGroup) -> Self {
        SceneMark::Group(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::rule::SceneRuleMark;

    #[test]
    fn test_group_paths_and_lookup() {
        let inner = SceneGroup::new("axis", [0.0, 28.0]).with_mark(SceneRuleMark::default());
        let outer = SceneGroup::new("legend", [0.0, 0.0])
            .with_mark(SceneRuleMark::default())
            .with_mark(SceneGroup::new("empty", [0.0, 0.0]).with_mark(inner));

        assert_eq!(outer.group_paths(), vec![vec![1], vec![1, 0]]);
        assert!(outer.find_group("empty").is_some());
        assert!(outer.find_group("axis").is_none());
        assert!(outer.find_mark("rule_mark").is_some());
        assert!(outer.validate().is_ok());
    }
}

use std::collections::HashMap;

use crate::error::ColorbarSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

/// Root of a draw-command tree with the dimensions of the output surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            marks: vec![],
            width,
            height,
            origin: [0.0, 0.0],
        }
    }

    pub fn with_mark(mut self, mark: impl Into<SceneMark>) -> Self {
        self.marks.push(mark.into());
        self
    }

    pub fn groups(&self) -> Vec<&SceneGroup> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Group(g) = m else {
                    return None;
                };
                Some(g)
            })
            .collect()
    }

    pub fn children(&self) -> &[SceneMark] {
        &self.marks
    }

    pub fn get_mark(&self, mark_path: &[usize]) -> Option<&SceneMark> {
        // empty path is the root, which is not a mark
        let (first, rest) = mark_path.split_first()?;
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }
        Some(child)
    }

    /// Returns the absolute origin of a group
    pub fn get_absolute_origin(
        &self,
        group_path: &[usize],
    ) -> Result<[f32; 2], ColorbarSceneGraphError> {
        let mut origin = self.origin;
        let mut marks = &self.marks;
        for index in group_path {
            let Some(SceneMark::Group(group)) = marks.get(*index) else {
                return Err(ColorbarSceneGraphError::InvalidGroupPath(
                    group_path.to_vec(),
                ));
            };
            origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
            marks = &group.marks;
        }
        Ok(origin)
    }

    /// Returns all of the group paths in the scene graph
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

    /// Returns the absolute origin of each group
    pub fn group_origins(&self) -> Result<HashMap<Vec<usize>, [f32; 2]>, ColorbarSceneGraphError> {
        self.group_paths()
            .into_iter()
            .map(|path| {
                let origin = self.get_absolute_origin(&path)?;
                Ok((path, origin))
            })
            .collect()
    }

    /// Returns mapping from the names of each named group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        let mut names = HashMap::new();
        for path in self.group_paths() {
            let Some(SceneMark::Group(group)) = self.get_mark(&path) else {
                continue;
            };
            if !group.name.is_empty() {
                names.insert(group.name.clone(), path);
            }
        }
        names
    }

    pub fn validate(&self) -> Result<(), ColorbarSceneGraphError> {
        self.marks.iter().try_for_each(|m| m.validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::text::SceneTextMark;

    fn scene() -> SceneGraph {
        let axis = SceneGroup::new("axis", [0.0, 28.0]).with_mark(SceneTextMark::default());
        let legend = SceneGroup::new("colorbar", [5.0, 5.0]).with_mark(axis);
        SceneGraph::new(320.0, 50.0).with_mark(legend)
    }

    #[test]
    fn test_absolute_origins() -> Result<(), ColorbarSceneGraphError> {
        let scene = scene();
        assert_eq!(scene.get_absolute_origin(&[0, 0])?, [5.0, 33.0]);
        assert_eq!(scene.group_origins()?.len(), 2);
        assert_eq!(
            scene.get_absolute_origin(&[0, 0, 0]),
            Err(ColorbarSceneGraphError::InvalidGroupPath(vec![0, 0, 0]))
        );
        Ok(())
    }

    #[test]
    fn test_group_names_and_marks() {
        let scene = scene();
        let names = scene.group_names();
        assert_eq!(names.get("axis"), Some(&vec![0, 0]));
        assert!(matches!(scene.get_mark(&[0, 0, 0]), Some(SceneMark::Text(_))));
        assert!(scene.get_mark(&[]).is_none());
    }
}

use std::sync::Arc;

use crate::error::ColorbarSceneGraphError;
use crate::marks::group::SceneGroup;
use crate::marks::image::SceneImageMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use colorbar_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneMark {
    Rule(SceneRuleMark),
    Text(Arc<SceneTextMark>),
    Image(Arc<SceneImageMark>),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Image(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Rule(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
            Self::Image(mark) => mark.zindex,
            Self::Group(mark) => mark.zindex,
        }
    }

    pub fn children(&self) -> &[SceneMark] {
        match self {
            Self::Group(mark) => &mark.marks,
            _ => &[],
        }
    }

    /// Checks that every array channel matches the mark's length, recursing into groups
    pub fn validate(&self) -> Result<(), ColorbarSceneGraphError> {
        match self {
            Self::Rule(mark) => mark.validate(),
            Self::Text(mark) => mark.validate(),
            Self::Image(mark) => mark.validate(),
            Self::Group(mark) => mark.validate(),
        }
    }
}

pub(crate) fn validate_channel<T: Sync + Clone>(
    mark: &str,
    channel: &str,
    len: u32,
    value: &ScalarOrArray<T>,
) -> Result<(), ColorbarSceneGraphError> {
    match value.array_len() {
        Some(actual) if actual != len as usize => {
            Err(ColorbarSceneGraphError::ChannelLengthMismatch {
                mark: mark.to_string(),
                channel: channel.to_string(),
                len,
                actual,
            })
        }
        _ => Ok(()),
    }
}

pub(crate) fn validate_indices(
    mark: &str,
    len: u32,
    indices: Option<&Arc<Vec<usize>>>,
) -> Result<(), ColorbarSceneGraphError> {
    let Some(indices) = indices else {
        return Ok(());
    };
    match indices.iter().find(|i| **i >= len as usize) {
        Some(index) => Err(ColorbarSceneGraphError::IndexOutOfBounds {
            mark: mark.to_string(),
            index: *index,
            len,
        }),
        None => Ok(()),
    }
}

pub(crate) fn indices_iter(
    len: u32,
    indices: Option<&Arc<Vec<usize>>>,
) -> Box<dyn Iterator<Item = usize> + '_> {
    if let Some(indices) = indices {
        Box::new(indices.iter().cloned())
    } else {
        Box::new(0..len as usize)
    }
}

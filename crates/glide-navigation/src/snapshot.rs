use glide_core::NavResult;
use serde::Serialize;

use crate::host::ViewHost;
use crate::lifecycle::LifecycleState;
use crate::navigator::Navigator;
use crate::screen::ScreenKey;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScreenSnapshot {
    pub screen: String,
    pub state: LifecycleState,
    pub foreground: bool,
}

/// Debug view of one navigation root.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackSnapshot {
    pub root: ScreenSnapshot,
    /// Bottom to top.
    pub stack: Vec<ScreenSnapshot>,
    pub overlays: Vec<ScreenSnapshot>,
    pub edge_pan: bool,
    pub busy: bool,
}

impl<H: ViewHost> Navigator<H> {
    pub fn snapshot(&self, root: ScreenKey) -> NavResult<StackSnapshot> {
        let node = self.node(root)?;
        Ok(StackSnapshot {
            root: self.screen_snapshot(root)?,
            stack: node
                .stack
                .iter()
                .map(|&k| self.screen_snapshot(k))
                .collect::<NavResult<_>>()?,
            overlays: node
                .overlays
                .iter()
                .map(|&k| self.screen_snapshot(k))
                .collect::<NavResult<_>>()?,
            edge_pan: node.root.edge_pan.is_some(),
            busy: self.is_busy(root),
        })
    }

    pub fn snapshot_json(&self, root: ScreenKey) -> NavResult<String> {
        let snapshot = self.snapshot(root)?;
        Ok(serde_json::to_string(&snapshot).unwrap_or("{}".into()))
    }

    fn screen_snapshot(&self, key: ScreenKey) -> NavResult<ScreenSnapshot> {
        let node = self.node(key)?;
        Ok(ScreenSnapshot {
            screen: node.id.to_string(),
            state: node.state,
            foreground: node.is_foreground,
        })
    }
}

//! Process probe adapter combining liveness and name lookup

use async_trait::async_trait;

use super::liveness::PidProbe;
use super::procinfo;
use crate::application::ports::{Liveness, ProcessProbe};

/// Probe for the local operating system
pub struct SystemProcessProbe {
    pids: PidProbe,
}

impl SystemProcessProbe {
    pub fn new() -> Self {
        Self {
            pids: PidProbe::new(),
        }
    }
}

impl Default for SystemProcessProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessProbe for SystemProcessProbe {
    fn probe(&self, pid: u32) -> Liveness {
        self.pids.probe(pid)
    }

    async fn process_name(&self, pid: u32) -> Option<String> {
        procinfo::process_name(pid).await
    }
}

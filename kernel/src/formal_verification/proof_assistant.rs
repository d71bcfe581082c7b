// Proof Assistant Module

extern crate alloc;
//
// 证明辅助模块
// 提供交互式证明辅助功能

use hashbrown::{HashMap, HashSet};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::Ordering;
use spin::Mutex;

use super::*;
use super::theorem_prover::{ProofSession, Proof};

/// 证明辅助器
pub struct ProofAssistant {
    /// 辅助器ID
    pub id: u64,
    /// 当前证明会话
    pub current_session: Option<ProofSession>,
    /// 证明历史
    pub proof_history: Vec<Proof>,
}

impl ProofAssistant {
    /// 创建新的证明辅助器
    pub fn new() -> Self {
        Self {
            id: 1,
            current_session: None,
            proof_history: Vec::new(),
        }
    }
}

/// 创建默认的证明辅助器
pub fn create_proof_assistant() -> Arc<Mutex<ProofAssistant>> {
    Arc::new(Mutex::new(ProofAssistant::new()))
}
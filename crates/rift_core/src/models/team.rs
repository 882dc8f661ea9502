use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub type TeamId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub gold: u64,
    pub diamond: u64,
    pub male_fans: u32,
    pub female_fans: u32,
    /// 0-100
    pub morale: u8,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gold: 0,
            diamond: 0,
            male_fans: 0,
            female_fans: 0,
            morale: 50,
        }
    }

    pub fn total_fans(&self) -> u64 {
        self.male_fans as u64 + self.female_fans as u64
    }

    /// Checked debit: rejects instead of clamping, so the balance can never
    /// go negative through this path.
    pub fn debit_gold(&mut self, cost: u64) -> Result<()> {
        if self.gold < cost {
            return Err(CoreError::InsufficientFunds { need: cost, have: self.gold });
        }
        self.gold -= cost;
        Ok(())
    }

    pub fn credit_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn debit_diamond(&mut self, cost: u64) -> Result<()> {
        if self.diamond < cost {
            return Err(CoreError::InsufficientFunds { need: cost, have: self.diamond });
        }
        self.diamond -= cost;
        Ok(())
    }

    pub fn credit_diamond(&mut self, amount: u64) {
        self.diamond = self.diamond.saturating_add(amount);
    }
}

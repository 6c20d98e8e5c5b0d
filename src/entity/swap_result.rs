use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub signature: String,
    pub input_mint: String,
    pub output_mint: String,
    pub amount_in: f64,
    pub amount_out: f64,
}

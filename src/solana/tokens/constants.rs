// Native SOL decimals (lamports per SOL = 10^9)
pub const SOL_DECIMALS: u8 = 9;

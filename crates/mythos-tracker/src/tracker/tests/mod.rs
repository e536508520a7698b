mod common;

mod tiers;

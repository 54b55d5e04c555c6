// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Pure, synchronous arithmetic: fixed-point amount conversion and
//! constant-product pricing. Nothing in here does I/O.

pub mod amm;
pub mod fixed_point;

pub use amm::{
    estimate_amount_out, estimate_amount_out_with_fee, ConstantProductFee, FEE_DENOMINATOR,
    FEE_NUMERATOR,
};
pub use fixed_point::{
    checked_add, checked_div, checked_mul, format_units, parse_units, scale_factor,
    AMOUNT_DECIMALS, MAX_DECIMALS,
};

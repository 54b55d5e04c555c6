// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across the crate

mod gas;
mod token;

pub use gas::GasPrice;
pub use token::TokenAddress;

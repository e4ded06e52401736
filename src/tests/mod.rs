// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod id_tests;
pub mod session_tests;
pub mod outcome_tests;

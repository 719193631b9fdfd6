pub mod db;
pub mod failures;
pub mod leetcode;
pub mod mixed;

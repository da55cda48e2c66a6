#![allow(dead_code)]

#[path = "../../src/testing.rs"]
mod testing;

pub use testing::*;

/// Lets spawned fetch tasks run to completion.
pub async fn drain() {
	for _ in 0..10 {
		tokio::task::yield_now().await;
	}
}

pub mod hash_sync;

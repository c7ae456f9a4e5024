pub mod dock;
pub mod serve;

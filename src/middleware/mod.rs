pub mod fault_injection;

pub mod authorization_gate_impl;

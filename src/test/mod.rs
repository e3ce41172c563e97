mod reassembly;
mod simulator;
mod wire;

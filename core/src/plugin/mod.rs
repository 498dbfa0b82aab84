pub mod externals;

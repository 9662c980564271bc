pub mod action_bar;

pub mod slides;

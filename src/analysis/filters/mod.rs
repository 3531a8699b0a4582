pub mod length;
pub mod lowercase;
pub mod normalize;
pub mod stemmer;
pub mod stopword;

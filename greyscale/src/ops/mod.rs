mod grey_contrast;

pub use grey_contrast::{
    Coefficients, ContrastRemap, FixedWeights, GreyContrast, GreyStatistics, MAX_VERSION, Moments,
    Version, transform,
};

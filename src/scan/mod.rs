pub mod challenges;
pub mod title;

pub use challenges::{
    challenge_number, scan_classic, scan_packages, Challenge, ClassicScan, PackageInfo,
    PackageScan,
};
pub use title::{challenge_title, title_from_dir_name, title_from_readme};

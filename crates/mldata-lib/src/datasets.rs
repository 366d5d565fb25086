//! File tables for the built-in dataset downloaders.
//!
//! Each function returns the [`DownloadPlan`] for one dataset. The tables are
//! plain data collected at compile time; the CLI wires them to subcommands.

use crate::download::{DownloadPlan, FileSource};

const UCI_ADULT_BASE_URL: &str =
    "http://archive.ics.uci.edu/ml/machine-learning-databases/adult/";
const UCI_IRIS_BASE_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/iris/";
const BINARIZED_MNIST_BASE_URL: &str =
    "http://www.cs.toronto.edu/~larocheh/public/datasets/binarized_mnist/";
const CIFAR_BASE_URL: &str = "https://www.cs.toronto.edu/~kriz/";
const MNIST_BASE_URL: &str = "http://yann.lecun.com/exdb/mnist/";
const SVHN_BASE_URL: &str = "http://ufldl.stanford.edu/housenumbers/";

pub fn adult() -> DownloadPlan {
    sourced(
        "adult",
        UCI_ADULT_BASE_URL,
        &["adult.data", "adult.test", "adult.names"],
    )
}

pub fn binarized_mnist() -> DownloadPlan {
    sourced(
        "binarized_mnist",
        BINARIZED_MNIST_BASE_URL,
        &[
            "binarized_mnist_train.amat",
            "binarized_mnist_valid.amat",
            "binarized_mnist_test.amat",
        ],
    )
}

pub fn celeba() -> DownloadPlan {
    // Hosted on Google Drive upstream, which plain HTTP cannot fetch; the
    // user must mirror the files and point --url-prefix at them.
    unsourced("celeba", &["img_align_celeba.zip", "list_attr_celeba.txt"])
}

pub fn cifar10() -> DownloadPlan {
    sourced("cifar10", CIFAR_BASE_URL, &["cifar-10-python.tar.gz"])
}

pub fn cifar100() -> DownloadPlan {
    sourced("cifar100", CIFAR_BASE_URL, &["cifar-100-python.tar.gz"])
}

pub fn dogs_vs_cats() -> DownloadPlan {
    unsourced("dogs_vs_cats", &["dogs_vs_cats.train.zip", "dogs_vs_cats.test1.zip"])
}

pub fn ilsvrc2010() -> DownloadPlan {
    unsourced(
        "ilsvrc2010",
        &[
            "ILSVRC2010_images_train.tar",
            "ILSVRC2010_images_val.tar",
            "ILSVRC2010_images_test.tar",
            "ILSVRC2010_devkit-1.0.tar.gz",
        ],
    )
}

pub fn iris() -> DownloadPlan {
    sourced("iris", UCI_IRIS_BASE_URL, &["iris.data"])
}

pub fn mnist() -> DownloadPlan {
    sourced(
        "mnist",
        MNIST_BASE_URL,
        &[
            "train-images-idx3-ubyte.gz",
            "train-labels-idx1-ubyte.gz",
            "t10k-images-idx3-ubyte.gz",
            "t10k-labels-idx1-ubyte.gz",
        ],
    )
}

/// Which of the two published SVHN formats to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvhnFormat {
    /// Format 1: the original, variable-resolution images.
    Full,
    /// Format 2: the 32x32 cropped digits.
    Cropped,
}

pub fn svhn(format: SvhnFormat) -> DownloadPlan {
    let filenames: &[&str] = match format {
        SvhnFormat::Full => &["train.tar.gz", "test.tar.gz", "extra.tar.gz"],
        SvhnFormat::Cropped => &["train_32x32.mat", "test_32x32.mat", "extra_32x32.mat"],
    };
    sourced("svhn", SVHN_BASE_URL, filenames)
}

fn sourced(dataset: &str, base_url: &str, filenames: &[&str]) -> DownloadPlan {
    DownloadPlan::new(
        dataset,
        filenames
            .iter()
            .map(|name| FileSource::new(*name, format!("{base_url}{name}")))
            .collect(),
    )
}

fn unsourced(dataset: &str, filenames: &[&str]) -> DownloadPlan {
    DownloadPlan::new(
        dataset,
        filenames
            .iter()
            .map(|name| FileSource::unsourced(*name))
            .collect(),
    )
}

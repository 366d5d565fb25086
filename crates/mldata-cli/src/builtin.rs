//! Built-in downloaders and registry providers.
//!
//! Everything loadable by name is collected into explicit tables here at
//! process start; nothing is resolved from strings at dispatch time.

use clap::{Arg, Command};
use once_cell::sync::Lazy;

use mldata_lib::datasets::{self, SvhnFormat};
use mldata_lib::{DownloadPlan, Result};

use crate::registry::{no_extra_flags, DownloadRequest, Downloader, Providers, Registry};

/// Name of the optional registry bundled with the binary.
pub const EXTRAS_REGISTRY: &str = "extras";

static PROVIDERS: Lazy<Providers> = Lazy::new(|| {
    let mut providers = Providers::new();
    providers
        .register(EXTRAS_REGISTRY, extras_registry)
        .expect("bundled provider names are unique");
    providers
});

/// Registry providers known to this binary.
pub fn providers() -> &'static Providers {
    &PROVIDERS
}

/// The downloaders compiled into the binary.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    let entries: [(&str, Downloader); 8] = [
        (
            "adult",
            plain("Adult census income tables", download_adult),
        ),
        (
            "binarized_mnist",
            plain("Binarized MNIST digits", download_binarized_mnist),
        ),
        (
            "cifar10",
            plain("CIFAR-10 image classification archive", download_cifar10),
        ),
        (
            "cifar100",
            plain("CIFAR-100 image classification archive", download_cifar100),
        ),
        (
            "ilsvrc2010",
            Downloader {
                about: "ILSVRC2010 image archives (requires --url-prefix)",
                configure: url_prefix_flag,
                run: download_ilsvrc2010,
            },
        ),
        ("iris", plain("Iris flower measurements", download_iris)),
        ("mnist", plain("MNIST handwritten digits", download_mnist)),
        (
            "svhn",
            Downloader {
                about: "Street View House Numbers",
                configure: svhn_flags,
                run: download_svhn,
            },
        ),
    ];
    for (name, downloader) in entries {
        registry
            .insert(name, downloader)
            .expect("built-in downloader names are unique");
    }
    registry
}

fn extras_registry() -> Registry {
    let mut registry = Registry::new();
    let entries: [(&str, Downloader); 2] = [
        (
            "celeba",
            Downloader {
                about: "CelebA face attributes (requires --url-prefix)",
                configure: url_prefix_flag,
                run: download_celeba,
            },
        ),
        (
            "dogs_vs_cats",
            Downloader {
                about: "Dogs vs. Cats images (requires --url-prefix)",
                configure: url_prefix_flag,
                run: download_dogs_vs_cats,
            },
        ),
    ];
    for (name, downloader) in entries {
        registry
            .insert(name, downloader)
            .expect("extras downloader names are unique");
    }
    registry
}

fn plain(about: &'static str, run: fn(&DownloadRequest) -> Result<()>) -> Downloader {
    Downloader {
        about,
        configure: no_extra_flags,
        run,
    }
}

fn url_prefix_flag(command: Command) -> Command {
    command.arg(
        Arg::new("url-prefix")
            .long("url-prefix")
            .value_name("URL")
            .help("URL prefix to prepend to the dataset filenames"),
    )
}

fn svhn_flags(command: Command) -> Command {
    command.arg(
        Arg::new("which-format")
            .long("which-format")
            .value_name("FORMAT")
            .value_parser(["1", "2"])
            .default_value("2")
            .help("SVHN format: 1 for the original images, 2 for the 32x32 cropped digits"),
    )
}

/// Fetch or clear the plan's files depending on the shared `--clear` flag.
fn run_plan(request: &DownloadRequest, plan: DownloadPlan) -> Result<()> {
    if request.clear {
        plan.clear(&request.directory)
    } else {
        plan.with_url_prefix(request.url_prefix())
            .fetch(&request.directory)
            .map(|_| ())
    }
}

fn download_adult(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::adult())
}

fn download_binarized_mnist(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::binarized_mnist())
}

fn download_celeba(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::celeba())
}

fn download_cifar10(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::cifar10())
}

fn download_cifar100(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::cifar100())
}

fn download_dogs_vs_cats(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::dogs_vs_cats())
}

fn download_ilsvrc2010(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::ilsvrc2010())
}

fn download_iris(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::iris())
}

fn download_mnist(request: &DownloadRequest) -> Result<()> {
    run_plan(request, datasets::mnist())
}

fn download_svhn(request: &DownloadRequest) -> Result<()> {
    let format = match request.flag("which-format") {
        Some("1") => SvhnFormat::Full,
        _ => SvhnFormat::Cropped,
    };
    run_plan(request, datasets::svhn(format))
}

use rand::Rng;
use std::{fmt, str::FromStr};

const REMOTE_IMAGES: [&str; 10] = [
    "https://images.dog.ceo/breeds/golden-retriever/20200705-130717.jpg",
    "https://images.dog.ceo/breeds/labrador/n02099712_8932.jpg",
    "https://images.dog.ceo/breeds/husky/n02110185_5821.jpg",
    "https://images.dog.ceo/breeds/beagle/n02088364_17206.jpg",
    "https://images.dog.ceo/breeds/corgi-cardigan/n02113186_8119.jpg",
    "https://images.dog.ceo/breeds/poodle-standard/n02113799_5049.jpg",
    "https://images.dog.ceo/breeds/bulldog-french/n02108915_7613.jpg",
    "https://images.dog.ceo/breeds/shepherd-german/n02106662_26664.jpg",
    "https://images.dog.ceo/breeds/retriever-chesapeake/n02099849_2621.jpg",
    "https://images.dog.ceo/breeds/spaniel-cocker/n02102318_4150.jpg",
];

pub const IMAGE_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// `/images/dogN.jpg` served from the public directory.
    Local,
    Remote,
}

impl FromStr for ImageSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ImageSource::Local),
            "remote" => Ok(ImageSource::Remote),
            other => Err(format!("unknown image source '{other}'")),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Local => f.write_str("local"),
            ImageSource::Remote => f.write_str("remote"),
        }
    }
}

/// Fixed set of dog pictures. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    images: Vec<String>,
}

impl ImageCatalog {
    pub fn new(source: ImageSource) -> Self {
        let images = match source {
            ImageSource::Local => (1..=IMAGE_COUNT)
                .map(|id| format!("/images/dog{id}.jpg"))
                .collect(),
            ImageSource::Remote => REMOTE_IMAGES.iter().map(|url| url.to_string()).collect(),
        };
        Self { images }
    }

    pub fn pick_random(&self) -> &str {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.images[rng.gen_range(0..self.images.len())]
    }

    pub fn contains(&self, image: &str) -> bool {
        self.images.iter().any(|candidate| candidate == image)
    }
}

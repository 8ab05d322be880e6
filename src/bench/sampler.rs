//! Daemon state sampling

use crate::client::DaemonClient;
use crate::core::Result;
use std::collections::HashSet;

/// Count the distinct repository tags the daemon currently reports.
///
/// Flattens every image's tag list into a set; purely observational, with
/// no comparison against expected counts.
pub fn distinct_tag_count(client: &dyn DaemonClient) -> Result<usize> {
    let images = client.list_images()?;

    let mut tags = HashSet::new();
    for image in &images {
        for tag in &image.repo_tags {
            tags.insert(tag.as_str());
        }
    }

    Ok(tags.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BuildOptions, ImageSummary};
    use crate::core::StressError;
    use std::io::Read;

    struct FixedClient {
        images: Vec<ImageSummary>,
    }

    impl DaemonClient for FixedClient {
        fn pull_image(&self, _reference: &str) -> Result<Box<dyn Read + Send>> {
            Ok(Box::new(std::io::empty()))
        }

        fn tag_image(&self, _source: &str, _target: &str) -> Result<()> {
            Ok(())
        }

        fn build_image(&self, _context: Vec<u8>, _options: &BuildOptions) -> Result<()> {
            Ok(())
        }

        fn list_images(&self) -> Result<Vec<ImageSummary>> {
            Ok(self.images.clone())
        }
    }

    fn image(tags: &[&str]) -> ImageSummary {
        ImageSummary {
            repo_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_counts_distinct_tags_across_images() {
        let client = FixedClient {
            images: vec![
                image(&["busybox:latest", "image-0"]),
                image(&["image-1", "image-2"]),
            ],
        };
        assert_eq!(distinct_tag_count(&client).unwrap(), 4);
    }

    #[test]
    fn test_duplicate_tags_counted_once() {
        let client = FixedClient {
            images: vec![image(&["shared:tag"]), image(&["shared:tag", "other"])],
        };
        assert_eq!(distinct_tag_count(&client).unwrap(), 2);
    }

    #[test]
    fn test_empty_inventory() {
        let client = FixedClient { images: vec![] };
        assert_eq!(distinct_tag_count(&client).unwrap(), 0);
    }

    #[test]
    fn test_list_error_propagates() {
        struct FailingClient;

        impl DaemonClient for FailingClient {
            fn pull_image(&self, _reference: &str) -> Result<Box<dyn Read + Send>> {
                Ok(Box::new(std::io::empty()))
            }

            fn tag_image(&self, _source: &str, _target: &str) -> Result<()> {
                Ok(())
            }

            fn build_image(&self, _context: Vec<u8>, _options: &BuildOptions) -> Result<()> {
                Ok(())
            }

            fn list_images(&self) -> Result<Vec<ImageSummary>> {
                Err(StressError::client("list", "daemon unreachable"))
            }
        }

        assert!(distinct_tag_count(&FailingClient).is_err());
    }
}

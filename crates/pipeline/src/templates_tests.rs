// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn template_args_repeats_the_flag() {
    let args = template_args(&[
        PathBuf::from("/opt/nuclei/official"),
        PathBuf::from("/opt/nuclei/custom"),
    ]);
    assert_eq!(args, "-t /opt/nuclei/official -t /opt/nuclei/custom");
}

#[test]
fn no_repos_means_empty_args() {
    assert_eq!(template_args(&[]), "");
}

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use seed_grabber_core::{run_grab, run_grab_with_callback, Bucket, GrabEvent, GrabOptions};
use tempfile::TempDir;

fn options_for(temp: &TempDir) -> GrabOptions {
    GrabOptions {
        root: temp.path().join("results"),
        output_dir: temp.path().join("out"),
    }
}

fn write(root: &Path, relative: &str, contents: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn read_output(options: &GrabOptions, bucket: Bucket) -> Result<String> {
    Ok(fs::read_to_string(
        options.output_dir.join(bucket.output_file_name()),
    )?)
}

fn prepare(temp: &TempDir) -> Result<GrabOptions> {
    let options = options_for(temp);
    fs::create_dir_all(&options.root)?;
    fs::create_dir_all(&options.output_dir)?;
    Ok(options)
}

#[test]
fn merges_winning_seeds_across_directories() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "a/winning_seeds.txt", "seed3 meta\nseed1 meta\n")?;
    write(&options.root, "b/winning_seeds.txt", "seed2 meta\n")?;

    let report = run_grab(&options)?;

    assert_eq!(read_output(&options, Bucket::Winning)?, "seed1\nseed2\nseed3\n");
    assert_eq!(read_output(&options, Bucket::Losing)?, "");
    assert_eq!(read_output(&options, Bucket::Unknown)?, "");
    assert_eq!(report.totals[0].bucket, Bucket::Winning);
    assert_eq!(report.totals[0].seeds, 3);
    assert_eq!(report.sources.len(), 2);
    Ok(())
}

#[test]
fn every_token_survives_with_its_multiplicity() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "r1/losing_seeds.txt", "x 1\ny 2\nx 3\n")?;
    write(&options.root, "r2/deep/losing_seeds.txt", "x 4\nz 5\n")?;
    write(&options.root, "r2/unknown_seeds.txt", "u 1\n")?;
    write(&options.root, "r2/other_seeds.txt", "nope 1\n")?;
    write(&options.root, "r2/seeds.log", "nope 1\n")?;

    run_grab(&options)?;

    let losing = read_output(&options, Bucket::Losing)?;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in losing.lines() {
        *counts.entry(line).or_default() += 1;
    }
    assert_eq!(counts.get("x"), Some(&3));
    assert_eq!(counts.get("y"), Some(&1));
    assert_eq!(counts.get("z"), Some(&1));
    assert_eq!(counts.len(), 3);

    let lines = losing.lines().collect::<Vec<_>>();
    assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]));

    assert_eq!(read_output(&options, Bucket::Unknown)?, "u\n");
    assert_eq!(read_output(&options, Bucket::Winning)?, "");
    Ok(())
}

#[test]
fn malformed_line_leaves_existing_outputs_untouched() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    for bucket in Bucket::ALL {
        fs::write(options.output_dir.join(bucket.output_file_name()), "previous\n")?;
    }
    write(&options.root, "a/winning_seeds.txt", "good meta\n")?;
    write(&options.root, "b/unknown_seeds.txt", "lonely\n")?;

    let result = run_grab(&options);

    assert!(result.is_err());
    for bucket in Bucket::ALL {
        assert_eq!(read_output(&options, bucket)?, "previous\n");
    }
    Ok(())
}

#[test]
fn malformed_line_writes_no_outputs() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "losing_seeds.txt", "one\n")?;

    assert!(run_grab(&options).is_err());
    for bucket in Bucket::ALL {
        assert!(!options.output_dir.join(bucket.output_file_name()).exists());
    }
    Ok(())
}

#[test]
fn empty_source_is_not_an_error() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "x/unknown_seeds.txt", "")?;

    let report = run_grab(&options)?;

    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].seeds, 0);
    assert_eq!(read_output(&options, Bucket::Unknown)?, "");
    Ok(())
}

#[test]
fn second_run_is_byte_identical() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "a/winning_seeds.txt", "b 1\na 2\n")?;
    write(&options.root, "a/losing_seeds.txt", "d 1\nc 2\nd 3\n")?;
    write(&options.root, "b/unknown_seeds.txt", "f 1\ne 2\n")?;

    run_grab(&options)?;
    let first = Bucket::ALL
        .iter()
        .map(|bucket| read_output(&options, *bucket))
        .collect::<Result<Vec<_>>>()?;

    run_grab(&options)?;
    let second = Bucket::ALL
        .iter()
        .map(|bucket| read_output(&options, *bucket))
        .collect::<Result<Vec<_>>>()?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn outputs_inside_root_are_not_reread() -> Result<()> {
    let temp = TempDir::new()?;
    let options = GrabOptions {
        root: temp.path().to_path_buf(),
        output_dir: temp.path().to_path_buf(),
    };
    write(temp.path(), "run/winning_seeds.txt", "w 1\n")?;

    run_grab(&options)?;
    let report = run_grab(&options)?;

    assert_eq!(report.sources.len(), 1);
    assert_eq!(read_output(&options, Bucket::Winning)?, "w\n");
    Ok(())
}

#[test]
fn events_announce_each_source_then_each_output() -> Result<()> {
    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "a/winning_seeds.txt", "w 1\n")?;
    write(&options.root, "b/losing_seeds.txt", "l 1\n")?;

    let mut events = Vec::new();
    let report = run_grab_with_callback(&options, |event| events.push(event))?;

    let reading = events
        .iter()
        .filter_map(|event| match event {
            GrabEvent::ReadingSource { bucket, .. } => Some(*bucket),
            GrabEvent::WroteOutput { .. } => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(reading, vec![Bucket::Winning, Bucket::Losing]);

    let written = events
        .iter()
        .filter_map(|event| match event {
            GrabEvent::WroteOutput { bucket, seeds, .. } => Some((*bucket, *seeds)),
            GrabEvent::ReadingSource { .. } => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        written,
        vec![(Bucket::Winning, 1), (Bucket::Losing, 1), (Bucket::Unknown, 0)]
    );
    assert!(matches!(events.last(), Some(GrabEvent::WroteOutput { .. })));

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["totals"][0]["bucket"], "winning");
    assert_eq!(json["totals"][0]["source_files"], 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn dangling_source_link_aborts_before_outputs() -> Result<()> {
    use std::os::unix::fs::symlink;

    let temp = TempDir::new()?;
    let options = prepare(&temp)?;
    write(&options.root, "a_winning_seeds.txt", "s1 m\n")?;
    symlink(
        options.root.join("missing.txt"),
        options.root.join("b_winning_seeds.txt"),
    )?;

    assert!(run_grab(&options).is_err());
    assert!(!options
        .output_dir
        .join(Bucket::Winning.output_file_name())
        .exists());
    Ok(())
}

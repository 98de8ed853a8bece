/*!
 * Controller tests covering single-file and folder processing
 */

use wordsync::app_config::Config;
use wordsync::app_controller::{BatchSummary, Controller, PairStatus};
use wordsync::file_utils::FileManager;
use wordsync::MachineTranscript;
use crate::common;

/// Test that a single run writes `<stem>.aligned.json` next to the input
#[tokio::test]
async fn test_run_withDefaultOutput_shouldWriteAlignedJson() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let (machine, corrected) = common::create_transcript_pair(dir.path(), "meeting").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let status = controller.run(machine, corrected, None, false).await.unwrap();

    let expected_output = dir.path().join("meeting.aligned.json");
    match status {
        PairStatus::Aligned { output, stats } => {
            assert_eq!(output, expected_output);
            assert_eq!(stats.insertions, 2);
        }
        other => panic!("expected aligned status, got {:?}", other),
    }

    let written = FileManager::read_to_string(&expected_output).unwrap();
    let transcript = MachineTranscript::from_json(&written).unwrap();
    assert_eq!(transcript.words.len(), 10);
    assert_eq!(transcript.paragraphs[1].speaker.as_deref(), Some("Bob"));
    assert!(!FileManager::file_exists(dir.path().join("meeting.aligned.txt")));
}

/// Test that existing output is skipped unless overwriting is forced
#[tokio::test]
async fn test_run_existingOutput_shouldSkipUnlessForced() {
    let dir = common::create_temp_dir().unwrap();
    let (machine, corrected) = common::create_transcript_pair(dir.path(), "call").unwrap();
    let output = dir.path().join("custom").join("call.out.json");
    FileManager::write_to_file(&output, "old").unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();

    let status = controller
        .run(machine.clone(), corrected.clone(), Some(output.clone()), false)
        .await
        .unwrap();
    assert_eq!(status, PairStatus::Skipped { output: output.clone() });
    assert_eq!(FileManager::read_to_string(&output).unwrap(), "old");

    let status = controller.run(machine, corrected, Some(output.clone()), true).await.unwrap();
    assert!(matches!(status, PairStatus::Aligned { .. }));
    assert!(FileManager::read_to_string(&output).unwrap().contains("\"transcript\""));
}

/// Test that the plain text rendering is written when configured
#[tokio::test]
async fn test_run_withWriteText_shouldAlsoWriteTextFile() {
    let dir = common::create_temp_dir().unwrap();
    let (machine, corrected) = common::create_transcript_pair(dir.path(), "talk").unwrap();
    let mut config = Config::default();
    config.output.write_text = true;
    config.output.pretty_json = false;
    let controller = Controller::with_config(config).unwrap();

    controller.run(machine, corrected, None, false).await.unwrap();

    let json = FileManager::read_to_string(dir.path().join("talk.aligned.json")).unwrap();
    assert_eq!(json.lines().count(), 1);

    let text = FileManager::read_to_string(dir.path().join("talk.aligned.txt")).unwrap();
    assert!(text.starts_with("[Alice]: Hello, this is a test recording."));
}

/// Test that a missing input is reported as an error
#[tokio::test]
async fn test_run_missingCorrectedText_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let machine = common::create_test_file(dir.path(), "alone.json", common::SAMPLE_MACHINE_JSON).unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let result = controller.run(machine, dir.path().join("alone.txt"), None, false).await;
    assert!(result.is_err());
}

/// Test folder processing with one broken pair among valid ones
#[tokio::test]
async fn test_run_folder_withBrokenPair_shouldCountFailureAndContinue() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    for stem in ["one", "two", "three"] {
        common::create_transcript_pair(dir.path(), stem).unwrap();
    }
    common::create_test_file(dir.path(), "broken.json", "{ \"words\": [").unwrap();
    common::create_test_file(dir.path(), "broken.txt", "Some text.").unwrap();

    let mut config = Config::default();
    config.processing.concurrent_jobs = 2;
    let controller = Controller::with_config(config).unwrap();

    let summary = controller.run_folder(dir.path().to_path_buf(), false).await.unwrap();
    assert_eq!(summary, BatchSummary { aligned: 3, skipped: 0, failed: 1 });

    for stem in ["one", "two", "three"] {
        assert!(FileManager::file_exists(dir.path().join(format!("{}.aligned.json", stem))));
    }
    assert!(!FileManager::file_exists(dir.path().join("broken.aligned.json")));

    let log = FileManager::read_to_string(dir.path().join("wordsync.batch.log")).unwrap();
    assert!(log.contains("3 aligned, 0 skipped, 1 errors"));

    // A second pass finds the outputs and leaves them alone
    let summary = controller.run_folder(dir.path().to_path_buf(), false).await.unwrap();
    assert_eq!(summary, BatchSummary { aligned: 0, skipped: 3, failed: 1 });
}

/// Test that a folder without pairs is an error
#[tokio::test]
async fn test_run_folder_withoutPairs_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(dir.path(), "notes.txt", "nothing to align").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    assert!(controller.run_folder(dir.path().to_path_buf(), false).await.is_err());
    assert!(controller.run_folder(dir.path().join("missing"), false).await.is_err());
}

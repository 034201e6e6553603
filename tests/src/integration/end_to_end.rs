//! # End-to-End Flows
//!
//! Key file → `FileKeySource` → `BloomFilterService` → `AppendFileSink`,
//! plus the CLI query loop wired to real files.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{BufReader, Cursor};
    use std::path::Path;
    use std::sync::Arc;

    use biobloom_cli::{resolve_config, run_queries, run_query_records, Args, PROMPT};
    use biobloom_filter::{
        AppendFileSink, BloomConfig, BloomConfigBuilder, BloomFilterService, DataError,
        FileKeySource, FilterError, KeyFormat, Metrics, NoOpMetrics,
    };
    use clap::Parser;

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn kmers(count: usize) -> Vec<String> {
        const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
        (0..count)
            .map(|i| (0..12).map(|j| BASES[(i >> (2 * j)) & 3]).collect())
            .collect()
    }

    fn write_lines(path: &Path, keys: &[String]) {
        fs::write(path, keys.join("\n") + "\n").unwrap();
    }

    // =========================================================================
    // FILE FLOWS
    // =========================================================================

    #[test]
    fn test_text_file_to_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("keys.txt");
        let output = dir.path().join("answers.txt");
        let keys = kmers(1000);
        write_lines(&input, &keys);

        let mut source = FileKeySource::new(&input, KeyFormat::Lines, true);
        let service =
            BloomFilterService::load(&mut source, BloomConfig::default(), Arc::new(NoOpMetrics))
                .unwrap();
        assert_eq!(service.report().size_bits, 5532);
        assert_eq!(service.report().hash_count, 7);

        {
            let mut sink = AppendFileSink::open(&output).unwrap();
            let positives = service
                .query_all(keys.iter().map(String::as_str), &mut sink)
                .unwrap();
            assert_eq!(positives, keys.len());
        }

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1000);
        assert_eq!(written.lines().next(), Some(format!("Key {} possible in filter", keys[0]).as_str()));
    }

    #[test]
    fn test_fasta_records_are_keys() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reads.fa");
        fs::write(&input, ">read1\nACGT\nACGT\n>read2 desc\nGGGGCCCC\n").unwrap();

        let config = BloomConfigBuilder::new()
            .target_fpr(0.001)
            .key_format(KeyFormat::Fasta)
            .build()
            .unwrap();
        let mut source = FileKeySource::new(&input, config.key_format, config.trim_keys);
        let service = BloomFilterService::load(&mut source, config, Arc::new(NoOpMetrics)).unwrap();

        assert_eq!(service.report().keys_loaded, 2);
        assert!(service.query("ACGTACGT"));
        assert!(service.query("GGGGCCCC"));
    }

    #[test]
    fn test_missing_input_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FileKeySource::new(dir.path().join("absent.txt"), KeyFormat::Lines, true);

        let result =
            BloomFilterService::load(&mut source, BloomConfig::default(), Arc::new(NoOpMetrics));
        assert!(matches!(
            result,
            Err(FilterError::DataError(DataError::Io { .. }))
        ));
    }

    #[test]
    fn test_empty_input_builds_no_filter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.fa");
        fs::write(&input, "").unwrap();

        let mut source = FileKeySource::new(&input, KeyFormat::Fasta, true);
        let result =
            BloomFilterService::load(&mut source, BloomConfig::default(), Arc::new(NoOpMetrics));
        assert!(result.err().map_or(false, |e| e.is_invalid_parameter()));
    }

    // =========================================================================
    // CLI FLOWS
    // =========================================================================

    #[test]
    fn test_cli_query_file_appends_answers() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("keys.txt");
        let queries = dir.path().join("queries.txt");
        let output = dir.path().join("answers.txt");
        write_lines(&input, &kmers(50));
        fs::write(&queries, format!("{}\n{}\n", kmers(1)[0], "NOT-A-KMER")).unwrap();

        let args = Args::try_parse_from([
            "biobloom",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "0.001",
            "--queries",
            queries.to_str().unwrap(),
        ])
        .unwrap();
        let config = resolve_config(&args, |_| None).unwrap();

        let metrics = Arc::new(Metrics::new());
        let mut source = FileKeySource::new(&args.input, config.key_format, config.trim_keys);
        let service = BloomFilterService::load(&mut source, config, metrics.clone()).unwrap();

        let mut sink = AppendFileSink::open(&args.output).unwrap();
        let reader = BufReader::new(fs::File::open(&queries).unwrap());
        let mut out = Vec::new();
        let summary = run_queries(&service, reader, &mut out, &mut sink, None, true).unwrap();
        drop(sink);

        assert_eq!(summary.queries, 2);
        assert_eq!(metrics.snapshot().queries, 2);

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], format!("Key {} possible in filter", kmers(1)[0]));
        assert!(lines[1].starts_with("Key NOT-A-KMER"));
    }

    #[test]
    fn test_cli_fasta_query_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reads.fa");
        let queries = dir.path().join("queries.fa");
        let output = dir.path().join("answers.txt");
        fs::write(&input, ">r1\nACGTAC\nGTAC\n>r2\nGGGGCCCC\n").unwrap();
        fs::write(&queries, ">q1\nACGTACGTAC\n>q2\nTTTTAAAATTTTAAAA\n").unwrap();

        let args = Args::try_parse_from([
            "biobloom",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "0.001",
            "--fasta",
            "--queries",
            queries.to_str().unwrap(),
        ])
        .unwrap();
        let config = resolve_config(&args, |_| None).unwrap();
        assert_eq!(config.key_format, KeyFormat::Fasta);

        let mut source = FileKeySource::new(&args.input, config.key_format, config.trim_keys);
        let service =
            BloomFilterService::load(&mut source, config, Arc::new(NoOpMetrics)).unwrap();

        let mut sink = AppendFileSink::open(&args.output).unwrap();
        let reader = BufReader::new(fs::File::open(&queries).unwrap());
        let mut out = Vec::new();
        let summary = run_query_records(&service, reader, &mut out, &mut sink, true).unwrap();
        drop(sink);

        assert_eq!(summary.queries, 2);
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.lines().next(), Some("Possible in filter"));
        assert_eq!(shown.lines().count(), 2);

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Key ACGTACGTAC possible in filter");
        assert!(lines[1].starts_with("Key TTTTAAAATTTTAAAA"));
    }

    #[test]
    fn test_cli_interactive_session() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("answers.txt");

        let mut source = vec!["GATTACA".to_string()];
        let service =
            BloomFilterService::load(&mut source, BloomConfig::default(), Arc::new(NoOpMetrics))
                .unwrap();

        let mut sink = AppendFileSink::open(&output).unwrap();
        let mut out = Vec::new();
        run_queries(
            &service,
            Cursor::new("GATTACA\n:Q\n"),
            &mut out,
            &mut sink,
            Some(PROMPT),
            true,
        )
        .unwrap();
        drop(sink);

        let shown = String::from_utf8(out).unwrap();
        assert_eq!(
            shown,
            format!("{p}Possible in filter\n{p}", p = PROMPT)
        );
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Key GATTACA possible in filter\n"
        );
    }
}

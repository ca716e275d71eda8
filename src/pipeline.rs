use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::bounded;
use log::debug;

use crate::extract::{Extractor, Verdict};
use crate::fasta::{FastaReader, FastaRecord, FastaWriter};
use crate::filter::Report;
use crate::logging::RejectLog;

struct Job {
    slot: usize,
    record: FastaRecord,
}

struct Done {
    slot: usize,
    verdict: Verdict,
}

/// Streams records through a fixed pool of workers in pool-width batches.
/// A batch is submitted whole and the driver blocks until every result of
/// that batch is back before reading more input, so at most `width`
/// records are ever in flight. Survivors are written in input order by
/// the driver alone; rejections are tallied and optionally logged.
pub fn run<R: BufRead>(
    mut reader: FastaReader<R>,
    writer: &mut FastaWriter,
    extractor: Arc<Extractor>,
    width: usize,
    reject_log: Option<&RejectLog>,
) -> io::Result<Report> {
    let (tx_job, rx_job) = bounded::<Job>(width);
    let (tx_done, rx_done) = bounded::<Done>(width);

    let mut workers = Vec::with_capacity(width);
    for _ in 0..width {
        let rx = rx_job.clone();
        let tx = tx_done.clone();
        let extractor = Arc::clone(&extractor);

        workers.push(thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                let verdict = extractor.process(job.record);
                tx.send(Done {
                    slot: job.slot,
                    verdict,
                })
                .unwrap();
            }
        }));
    }
    drop(rx_job);
    drop(tx_done);

    let mut report = Report::default();
    let mut batches = 0u64;

    loop {
        let mut batch = Vec::with_capacity(width);
        while batch.len() < width {
            match reader.next_record()? {
                Some(record) => batch.push(record),
                None => break,
            }
        }
        if batch.is_empty() {
            break;
        }

        let n = batch.len();
        report.total_records += n as u64;
        for (slot, record) in batch.into_iter().enumerate() {
            tx_job.send(Job { slot, record }).unwrap();
        }

        // barrier: collect the whole batch before touching more input
        let mut results: Vec<Option<Verdict>> = (0..n).map(|_| None).collect();
        for _ in 0..n {
            let done = rx_done.recv().unwrap();
            results[done.slot] = Some(done.verdict);
        }

        for verdict in results.into_iter().flatten() {
            match verdict {
                Verdict::Kept(record) => {
                    report.passed_records += 1;
                    writer.write_record(&record)?;
                }
                Verdict::Rejected { id, reason } => {
                    report.tally(reason);
                    if let Some(log) = reject_log {
                        log.log(&format!("{} : {}", id, reason));
                    }
                }
            }
        }

        batches += 1;
        if batches % 1000 == 0 {
            debug!("{} batches processed", batches);
        }
    }

    drop(tx_job);
    for worker in workers {
        let _ = worker.join();
    }
    writer.flush()?;

    Ok(report)
}

use crate::cli::{Args, Command};
use anyhow::Context;
use clap::Parser;
use rdf_sieve_hierarchy::{
    class_hierarchy_sink, domain_range_sink, propagate, read_class_map, read_domain_range,
    shared_class_map, write_class_map, write_domain_range, DomainRangeClassInjector,
    SuperClassInjector,
};
use rdf_sieve_io::{merge, run, FileSource, NTriplesWriterSink};
use rdf_sieve_model::vocab::rdf;
use rdf_sieve_model::{Term, Triple};
use rdf_sieve_stream::{
    EqualityNodeFilter, FilterSink, FlatMapSink, LogProgressMonitor, NamespaceNodeFilter,
    NodeFilter, ProgressSink, SamplingFilter, SharedSink, SlotPredicate, SuppressLifecycle,
    TeeSink,
};
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;

mod cli;

/// Progress is logged every this many processed triples.
const PROGRESS_STEP: u64 = 100_000;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Cat {
            output,
            inputs,
            queue_capacity,
            lenient,
        } => cat(&output, &inputs, queue_capacity, lenient),
        Command::ClassHierarchy { input, output } => class_hierarchy(&input, &output),
        Command::DomainRange { input, output } => domain_range(&input, &output),
        Command::AddClasses {
            input,
            output,
            hierarchy,
            domain_range,
            class_namespace,
        } => add_classes(&input, &output, &hierarchy, &domain_range, &class_namespace),
        Command::Filter {
            input,
            output,
            subject_namespace,
            predicate_namespace,
            exclude_property,
            drop_literal_objects,
            lenient,
        } => filter(
            &input,
            &output,
            subject_namespace,
            predicate_namespace,
            exclude_property,
            drop_literal_objects,
            lenient,
        ),
        Command::Split {
            input,
            accepted,
            rejected,
            probability,
            limit,
            seed,
        } => split(&input, &accepted, &rejected, probability, limit, seed),
    }
}

fn output_sink(path: &Path) -> anyhow::Result<NTriplesWriterSink<BufWriter<File>>> {
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    Ok(NTriplesWriterSink::new(BufWriter::new(file)))
}

fn progress() -> LogProgressMonitor {
    LogProgressMonitor::new("processed triples", PROGRESS_STEP)
}

fn cat(output: &Path, inputs: &[PathBuf], queue_capacity: usize, lenient: bool) -> anyhow::Result<()> {
    let sources: Vec<FileSource> = inputs
        .iter()
        .map(|path| {
            let source = FileSource::new(path);
            if lenient {
                source.lenient()
            } else {
                source
            }
        })
        .collect();
    let sink = merge(&sources, output_sink(output)?, queue_capacity)?;
    sink.close()?;
    tracing::info!("merged {} files into {}", inputs.len(), output.display());
    Ok(())
}

fn class_hierarchy(input: &Path, output: &Path) -> anyhow::Result<()> {
    let hierarchy = shared_class_map();
    let mut root = ProgressSink::new(class_hierarchy_sink(Rc::clone(&hierarchy)), progress());
    run(&FileSource::new(input), &mut root)
        .with_context(|| format!("Could not stream {}", input.display()))?;
    drop(root);

    let mut hierarchy = Rc::try_unwrap(hierarchy)
        .ok()
        .context("the pipeline still holds the hierarchy map")?
        .into_inner();
    tracing::info!("collected {} classes, propagating superclasses", hierarchy.len());
    propagate(&mut hierarchy);

    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("Could not create {}", output.display()))?,
    );
    write_class_map(&mut writer, &hierarchy)?;
    writer.flush()?;
    tracing::info!("wrote {} classes to {}", hierarchy.len(), output.display());
    Ok(())
}

fn domain_range(input: &Path, output: &Path) -> anyhow::Result<()> {
    let domains = shared_class_map();
    let ranges = shared_class_map();
    let mut root = ProgressSink::new(
        domain_range_sink(Rc::clone(&domains), Rc::clone(&ranges)),
        progress(),
    );
    run(&FileSource::new(input), &mut root)
        .with_context(|| format!("Could not stream {}", input.display()))?;
    drop(root);

    let domains = Rc::try_unwrap(domains)
        .ok()
        .context("the pipeline still holds the domain map")?
        .into_inner();
    let ranges = Rc::try_unwrap(ranges)
        .ok()
        .context("the pipeline still holds the range map")?
        .into_inner();

    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("Could not create {}", output.display()))?,
    );
    write_domain_range(&mut writer, &domains, &ranges)?;
    writer.flush()?;
    tracing::info!(
        "wrote {} domain and {} range declarations to {}",
        domains.len(),
        ranges.len(),
        output.display()
    );
    Ok(())
}

/// Accepts `rdf:type` statements whose object belongs to the class
/// namespace.
fn class_type_predicate(class_namespace: &str) -> SlotPredicate {
    SlotPredicate::new(
        None,
        Some(Box::new(EqualityNodeFilter::new(rdf::TYPE.into_owned()))),
        Some(Box::new(NamespaceNodeFilter::new([class_namespace]))),
    )
}

fn add_classes(
    input: &Path,
    output: &Path,
    hierarchy_file: &Path,
    domain_range_file: &Path,
    class_namespace: &str,
) -> anyhow::Result<()> {
    let hierarchy = read_class_map(BufReader::new(File::open(hierarchy_file).with_context(
        || format!("Could not open {}", hierarchy_file.display()),
    )?))?;
    let (domains, ranges) = read_domain_range(BufReader::new(
        File::open(domain_range_file)
            .with_context(|| format!("Could not open {}", domain_range_file.display()))?,
    ))?;
    tracing::info!(
        "loaded {} classes, {} domain and {} range declarations",
        hierarchy.len(),
        domains.len(),
        ranges.len()
    );

    // Create the pipeline starting from its end. The output sink is
    // reachable from three branches and owned through a shared handle; all
    // but one path suppress lifecycle forwarding.
    let out = SharedSink::new(output_sink(output)?);

    // Widens type statements over known classes with all superclasses. The
    // trailing filter re-checks the produced statements in case the
    // hierarchy contains classes outside the configured namespace.
    let super_injector = SuperClassInjector::new(hierarchy);
    let type_branch = SharedSink::new(FilterSink::new(
        class_type_predicate(class_namespace),
        FlatMapSink::new(
            move |t: &Triple| super_injector.expand(t),
            FilterSink::new(class_type_predicate(class_namespace), out.clone()),
        ),
    ));

    // Forwards every remaining triple and synthesizes type statements from
    // the domain/range declarations of its predicate. The synthesized
    // statements also feed the widening branch.
    let dr_injector = DomainRangeClassInjector::new(domains, ranges);
    let dr_branch = FlatMapSink::new(
        move |t: &Triple| dr_injector.expand(t),
        TeeSink::new(
            SuppressLifecycle::new(out.clone()),
            SuppressLifecycle::new(type_branch.clone()),
        ),
    );

    // Type statements of the class namespace are written and widened;
    // everything else goes through the domain/range branch.
    let root = FilterSink::with_rejected(
        class_type_predicate(class_namespace),
        TeeSink::new(SuppressLifecycle::new(out.clone()), type_branch.clone()),
        dr_branch,
    );
    let mut root = ProgressSink::new(root, progress());

    run(&FileSource::new(input), &mut root)
        .with_context(|| format!("Could not stream {}", input.display()))?;
    drop(root);
    drop(type_branch);
    let sink = out
        .into_inner()
        .context("the pipeline still holds the output sink")?;
    sink.close()?;
    Ok(())
}

fn filter(
    input: &Path,
    output: &Path,
    subject_namespace: Vec<String>,
    predicate_namespace: Vec<String>,
    exclude_property: Vec<String>,
    drop_literal_objects: bool,
    lenient: bool,
) -> anyhow::Result<()> {
    let subject_filter =
        (!subject_namespace.is_empty()).then(|| NamespaceNodeFilter::new(subject_namespace));
    let predicate_filter =
        (!predicate_namespace.is_empty()).then(|| NamespaceNodeFilter::new(predicate_namespace));
    let excluded: FxHashSet<String> = exclude_property.into_iter().collect();

    let predicate = move |t: &Triple| {
        subject_filter
            .as_ref()
            .map_or(true, |f| f.matches(Some(t.subject.as_ref().into())))
            && predicate_filter
                .as_ref()
                .map_or(true, |f| f.matches(Some(t.predicate.as_ref().into())))
            && !excluded.contains(t.predicate.as_str())
            && (!drop_literal_objects || !matches!(t.object, Term::Literal(_)))
    };

    let mut root = ProgressSink::new(FilterSink::new(predicate, output_sink(output)?), progress());
    let source = if lenient {
        FileSource::new(input).lenient()
    } else {
        FileSource::new(input)
    };
    run(&source, &mut root).with_context(|| format!("Could not stream {}", input.display()))?;
    let (sink, _) = root.into_inner().into_parts();
    sink.close()?;
    Ok(())
}

fn split(
    input: &Path,
    accepted: &Path,
    rejected: &Path,
    probability: f64,
    limit: Option<u64>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    let sampler = match limit {
        Some(limit) => SamplingFilter::with_limit(probability, limit, seed)?,
        None => SamplingFilter::new(probability, seed)?,
    };

    let mut root = ProgressSink::new(
        FilterSink::with_rejected(sampler, output_sink(accepted)?, output_sink(rejected)?),
        progress(),
    );
    run(&FileSource::new(input), &mut root)
        .with_context(|| format!("Could not stream {}", input.display()))?;
    let (accepted_sink, rejected_sink) = root.into_inner().into_parts();
    accepted_sink.close()?;
    rejected_sink.close()?;
    Ok(())
}

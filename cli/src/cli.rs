use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "rdf-sieve")]
/// Streaming preprocessing toolkit for large RDF dumps
pub struct Args {
    /// Enables debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge RDF files into a single N-Triples file
    ///
    /// The inputs are read on the calling thread and handed to a writer
    /// thread through a bounded queue. Ordering across input files is not
    /// preserved.
    Cat {
        /// File to write the merged triples to
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Files to merge
        ///
        /// Compressed inputs (.gz, .bz2) are decompressed transparently;
        /// the format of each file is guessed from its extension.
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        inputs: Vec<PathBuf>,
        /// Capacity of the queue between the readers and the writer thread
        #[arg(long, default_value_t = 4096)]
        queue_capacity: usize,
        /// Keep going when an input contains malformed triples
        #[arg(long)]
        lenient: bool,
    },
    /// Collect the rdfs:subClassOf hierarchy of a dataset
    ///
    /// Streams the input once, gathers every class with its directly
    /// declared superclasses, computes the transitive closure (tolerating
    /// cycles) and writes the result as a JSON object of arrays.
    ClassHierarchy {
        /// Dataset to read
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File to write the class hierarchy JSON to
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },
    /// Collect the rdfs:domain and rdfs:range declarations of a dataset
    ///
    /// Writes a two-element JSON array: the property-to-domain-classes map
    /// followed by the property-to-range-classes map.
    DomainRange {
        /// Dataset to read
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File to write the domain/range JSON to
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },
    /// Materialize implied rdf:type triples of a dataset
    ///
    /// Streams the dataset through a DAG that forwards every triple,
    /// synthesizes rdf:type statements from the domain/range declarations
    /// of its predicate, and widens type statements over known classes
    /// with all of their superclasses. The output may contain duplicates;
    /// deduplicate downstream if required.
    AddClasses {
        /// Dataset to read
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File to write the expanded dataset to
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Class hierarchy JSON written by class-hierarchy
        #[arg(long, value_hint = ValueHint::FilePath)]
        hierarchy: PathBuf,
        /// Domain/range JSON written by domain-range
        #[arg(long, value_hint = ValueHint::FilePath)]
        domain_range: PathBuf,
        /// Namespace of the classes whose type statements are widened
        #[arg(long)]
        class_namespace: String,
    },
    /// Keep the triples matching namespace rules, drop everything else
    Filter {
        /// Dataset to read
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File to write the kept triples to
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Namespaces the subject has to belong to (any match counts)
        #[arg(long)]
        subject_namespace: Vec<String>,
        /// Namespaces the predicate has to belong to (any match counts)
        #[arg(long)]
        predicate_namespace: Vec<String>,
        /// Properties whose triples are dropped even when they match
        #[arg(long)]
        exclude_property: Vec<String>,
        /// Drop triples whose object is a literal
        #[arg(long)]
        drop_literal_objects: bool,
        /// Keep going when the input contains malformed triples
        #[arg(long)]
        lenient: bool,
    },
    /// Split a dataset into two files by probabilistic sampling
    Split {
        /// Dataset to read
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File receiving the sampled triples
        #[arg(long, value_hint = ValueHint::FilePath)]
        accepted: PathBuf,
        /// File receiving all remaining triples
        #[arg(long, value_hint = ValueHint::FilePath)]
        rejected: PathBuf,
        /// Probability with which a triple is sampled, in [0, 1]
        #[arg(short, long, default_value_t = 0.5)]
        probability: f64,
        /// Stop sampling after this many accepted triples
        #[arg(long)]
        limit: Option<u64>,
        /// Seed for the random number generator; random when absent
        #[arg(long)]
        seed: Option<u64>,
    },
}

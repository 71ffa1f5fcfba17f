use clap::{Parser, Subcommand};
use pivot_forge::builder::{self, BuildParams, DEFAULT_PYRAMID_DIR};
use pivot_forge::deepzoom::DeepZoomBackend;
use pivot_forge::{cxml, output};
use std::path::PathBuf;

/// Shared inputs for commands that read the CSV tables.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Collection display name
    #[arg(long)]
    name: String,

    /// CSV table defining the facet categories
    /// (name, type, filterVisible, metaDataVisible, wordWheelVisible)
    #[arg(long)]
    facets: PathBuf,

    /// CSV table with one row per item; the header must contain
    /// 'href' and 'description' columns
    #[arg(long)]
    items: PathBuf,
}

#[derive(Parser)]
#[command(name = "pivot-forge")]
#[command(about = "Build zoomable PivotViewer collections from CSV metadata and images")]
#[command(long_about = "\
Build zoomable PivotViewer collections from CSV metadata and images

Two CSV tables describe the collection. The facet table defines the metadata
columns (one facet per row):

  name,type,filter,metadata,wordwheel
  name,String,1,1,1
  image_path,String,0,0,0
  color,String,1,1,1

The item table carries one row per item. Its header locates the 'href' and
'description' columns; every other column is a facet value, in facet order.
The first column doubles as the item's display name:

  name,href,description,image_path,color
  Red,http://example.com/red,a red car,red.jpg,Red

The 'image_path' facet names each item's source image inside --images. The
build writes collection.cxml plus a Deep Zoom pyramid per image and a
combined pyramid manifest into the destination folder.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: CXML document + Deep Zoom pyramids
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Folder containing the source images
        #[arg(long)]
        images: PathBuf,

        /// Output folder for the collection package
        #[arg(long, default_value = "collection")]
        dest: PathBuf,

        /// Pyramid subfolder inside the output folder
        #[arg(long, default_value = DEFAULT_PYRAMID_DIR)]
        pyramid_dir: String,
    },
    /// Write only the CXML document, skipping pyramid generation
    Cxml {
        #[command(flatten)]
        input: InputArgs,

        /// Output folder for the document
        #[arg(long, default_value = "collection")]
        dest: PathBuf,

        /// Pyramid subfolder the document's ImgBase should point into
        #[arg(long, default_value = DEFAULT_PYRAMID_DIR)]
        pyramid_dir: String,
    },
    /// Load and validate the CSV inputs without writing anything
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Print the assembled collection as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            input,
            images,
            dest,
            pyramid_dir,
        } => {
            let backend = DeepZoomBackend::new();
            let report = builder::build(
                &BuildParams {
                    name: &input.name,
                    facets_csv: &input.facets,
                    items_csv: &input.items,
                    image_dir: &images,
                    dest: &dest,
                    pyramid_dir: &pyramid_dir,
                },
                &backend,
            )?;
            output::print_build_report(&report);
        }
        Command::Cxml {
            input,
            dest,
            pyramid_dir,
        } => {
            let collection =
                builder::assemble(&input.name, &input.facets, &input.items, &pyramid_dir)?;
            std::fs::create_dir_all(&dest)?;
            let path = dest.join(builder::CXML_FILENAME);
            cxml::save(&collection, &path)?;
            println!("Wrote {}", path.display());
        }
        Command::Check { input, json } => {
            let collection = builder::assemble(
                &input.name,
                &input.facets,
                &input.items,
                DEFAULT_PYRAMID_DIR,
            )?;
            // image_path is only required for pyramid builds, but a check
            // should flag its absence before anyone runs one.
            builder::image_path_column(collection.facets())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&collection)?);
            } else {
                output::print_collection_summary(&collection);
                println!();
                println!("Inputs are valid");
            }
        }
    }

    Ok(())
}

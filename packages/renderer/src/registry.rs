use crate::blocks::{BlockRenderer, ButtonRenderer, ImageRenderer, TextRenderer};
use crate::error::{RenderError, RenderResult};
use crate::options::RenderOptions;
use crate::vnode::VNode;
use pagecraft_model::{Block, BlockType};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Instantiates the renderer for one block
pub type RendererFactory =
    for<'a> fn(&'a Block, &'a RenderOptions) -> RenderResult<Box<dyn BlockRenderer + 'a>>;

/// Maps a block's type tag to the renderer that produces its output forms
pub struct Registry {
    options: RenderOptions,
    factories: HashMap<BlockType, RendererFactory>,
}

impl Registry {
    /// Registry with every built-in renderer, verified to cover all block
    /// types
    pub fn new(options: RenderOptions) -> RenderResult<Self> {
        let mut registry = Self::empty(options);
        registry
            .register(BlockType::Text, text_renderer)
            .register(BlockType::Image, image_renderer)
            .register(BlockType::Button, button_renderer);

        registry.verify()?;
        Ok(registry)
    }

    pub fn empty(options: RenderOptions) -> Self {
        Self {
            options,
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, block_type: BlockType, factory: RendererFactory) -> &mut Self {
        tracing::trace!(%block_type, "registering renderer");
        self.factories.insert(block_type, factory);
        self
    }

    /// Fails with the first block type that has no renderer
    pub fn verify(&self) -> RenderResult<()> {
        match BlockType::iter().find(|block_type| !self.factories.contains_key(block_type)) {
            Some(missing) => Err(RenderError::UnregisteredType(missing)),
            None => Ok(()),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Validate `block` and instantiate its renderer
    pub fn resolve<'a>(&'a self, block: &'a Block) -> RenderResult<Box<dyn BlockRenderer + 'a>> {
        block.validate()?;

        let block_type = block.block_type();
        let factory = self
            .factories
            .get(&block_type)
            .ok_or(RenderError::UnregisteredType(block_type))?;

        let renderer = factory(block, &self.options)?;
        if renderer.block_type() != block_type {
            return Err(RenderError::TypeMismatch {
                expected: renderer.block_type(),
                found: block_type,
            });
        }

        Ok(renderer)
    }

    pub fn render_to_interactive(&self, block: &Block) -> RenderResult<VNode> {
        Ok(self.resolve(block)?.render_to_interactive())
    }

    pub fn render_to_markup(&self, block: &Block) -> RenderResult<String> {
        Ok(self.resolve(block)?.render_to_markup())
    }

    pub fn render_to_email_markup(&self, block: &Block) -> RenderResult<String> {
        Ok(self.resolve(block)?.render_to_email_markup())
    }
}

fn text_renderer<'a>(
    block: &'a Block,
    options: &'a RenderOptions,
) -> RenderResult<Box<dyn BlockRenderer + 'a>> {
    Ok(Box::new(TextRenderer::new(block, options)?))
}

fn image_renderer<'a>(
    block: &'a Block,
    options: &'a RenderOptions,
) -> RenderResult<Box<dyn BlockRenderer + 'a>> {
    Ok(Box::new(ImageRenderer::new(block, options)?))
}

fn button_renderer<'a>(
    block: &'a Block,
    options: &'a RenderOptions,
) -> RenderResult<Box<dyn BlockRenderer + 'a>> {
    Ok(Box::new(ButtonRenderer::new(block, options)?))
}

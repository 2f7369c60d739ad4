//! Tool Router - builds the rmcp ToolRouter from registry.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::pricing::PricingService;

use super::definitions::{
    GetMonthlyCostTool, GetProductsTool, GetServiceNamesTool, ListServiceFamiliesTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(service: Arc<PricingService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListServiceFamiliesTool::create_route(service.clone()))
        .with_route(GetServiceNamesTool::create_route(service.clone()))
        .with_route(GetProductsTool::create_route(service.clone()))
        .with_route(GetMonthlyCostTool::create_route(service))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::config::PricingConfig;

    struct TestServer {}

    fn test_service() -> Arc<PricingService> {
        Arc::new(PricingService::new(PricingConfig::default()).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_service());
        let tools = router.list_all();
        assert_eq!(tools.len(), 4);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list_service_families"));
        assert!(names.contains(&"get_service_names"));
        assert!(names.contains(&"get_products"));
        assert!(names.contains(&"get_monthly_cost"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let service = test_service();
        let registry = ToolRegistry::new(service.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(service);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}

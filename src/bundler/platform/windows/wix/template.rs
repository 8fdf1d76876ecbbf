//! WiX source template.

/// Handlebars template for the product `.wxs` document (WiX 3 schema).
///
/// Directories are emitted as flat `DirectoryRef` blocks under the install
/// root so the template needs no recursion.
pub const WXS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Wix xmlns="http://schemas.microsoft.com/wix/2006/wi">
  <Product Id="*"
           Name="{{product_name}}"
           Language="{{language}}"
           Version="{{version}}"
           Manufacturer="{{manufacturer}}"
           UpgradeCode="{{upgrade_code}}">
    <Package InstallerVersion="500"
             Compressed="yes"
             Description="{{description}}"
             Manufacturer="{{manufacturer}}"
             Platform="{{platform}}"
             InstallScope="{{install_scope}}"{{#if elevated}}
             InstallPrivileges="elevated"{{/if}} />
{{#if major_upgrade}}
    <MajorUpgrade DowngradeErrorMessage="A newer version of [ProductName] is already installed." />
{{/if}}
    <MediaTemplate EmbedCab="yes" />
{{#each properties}}
    <Property Id="{{id}}" Value="{{value}}" />
{{/each}}
{{#if url_info_about}}
    <Property Id="ARPURLINFOABOUT" Value="{{url_info_about}}" />
{{/if}}
{{#if license}}
    <WixVariable Id="WixUILicenseRtf" Value="{{license}}" />
{{/if}}

    <Directory Id="TARGETDIR" Name="SourceDir">
      <Directory Id="{{program_files_dir}}">
        <Directory Id="{{install_dir_id}}" Name="{{install_dir_name}}" />
      </Directory>
    </Directory>
{{#each directories}}
    <DirectoryRef Id="{{parent}}">
      <Directory Id="{{id}}" Name="{{name}}" />
    </DirectoryRef>
{{/each}}

{{#each components}}
    <DirectoryRef Id="{{directory}}">
      <Component Id="{{id}}" Guid="{{guid}}"{{#if win64}} Win64="yes"{{/if}}{{#if environment}} KeyPath="yes"{{/if}}>
{{#if file}}
        <File Id="{{file.id}}" Source="{{file.source}}" Name="{{file.name}}" KeyPath="yes" />
{{/if}}
{{#if environment}}
        <CreateFolder />
        <Environment Id="{{environment.id}}"
                     Name="{{environment.name}}"
                     Value="{{environment.value}}"
                     Permanent="{{environment.permanent}}"
                     Part="{{environment.part}}"
                     Action="{{environment.action}}"
                     System="{{environment.system}}" />
{{/if}}
{{#if condition}}
        <Condition>{{condition}}</Condition>
{{/if}}
      </Component>
    </DirectoryRef>
{{/each}}

{{#each features}}
    <Feature Id="{{id}}" Title="{{title}}" Level="{{level}}" Absent="{{absent}}" AllowAdvertise="{{allow_advertise}}">
{{#each components}}
      <ComponentRef Id="{{this}}" />
{{/each}}
    </Feature>
{{/each}}

{{#each set_properties}}
    <SetProperty Id="{{property}}" Action="{{action}}" Value="{{value}}" After="{{after}}" Sequence="{{sequence}}" />
{{/each}}
{{#each custom_actions}}
    <Binary Id="{{binary_id}}" SourceFile="{{binary}}" />
    <CustomAction Id="{{id}}" BinaryKey="{{binary_id}}" ExeCommand="" Execute="immediate" Return="{{return_mode}}" />
{{/each}}
{{#if custom_actions}}
    <InstallExecuteSequence>
{{#each custom_actions}}
      <Custom Action="{{id}}" After="{{after}}">{{condition}}</Custom>
{{/each}}
    </InstallExecuteSequence>
{{/if}}
{{#if ui_ref}}

    <UIRef Id="{{ui_ref}}" />
    <UIRef Id="WixUI_ErrorProgressText" />
{{/if}}
  </Product>
</Wix>
"#;
